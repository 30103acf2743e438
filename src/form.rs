use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::ClientError;
use crate::reader_length;

/// Name of the multipart field that carries the uploaded file.
pub const FILE_FIELD: &str = "file";

/// A file selected in a form's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedFile {
    Path(PathBuf),
    Memory { file_name: String, bytes: Vec<u8> },
}

impl SelectedFile {
    fn open(&self) -> Result<FileAttachment, ClientError> {
        match self {
            SelectedFile::Path(path) => FileAttachment::from_path(path),
            SelectedFile::Memory { file_name, bytes } => {
                FileAttachment::from_reader(file_name.clone(), io::Cursor::new(bytes.clone()))
            }
        }
    }
}

/// File content bound for one request. The reader is consumed by the
/// transport, so an attachment cannot be sent twice.
pub struct FileAttachment {
    pub file_name: String,
    pub mime_type: &'static str,
    pub length: u64,
    pub(crate) reader: Box<dyn io::Read + Send + 'static>,
}

impl FileAttachment {
    pub fn from_path(path: &Path) -> Result<FileAttachment, ClientError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("upload"));
        FileAttachment::from_reader(file_name, fs::File::open(path)?)
    }

    pub fn from_reader<T: io::Read + Send + 'static>(
        file_name: String,
        reader: T,
    ) -> Result<FileAttachment, ClientError> {
        let (reader, length) = reader_length::determine_length(reader)?;
        Ok(FileAttachment {
            mime_type: mime_for(&file_name),
            file_name,
            length,
            reader,
        })
    }

    pub fn into_reader(self) -> Box<dyn io::Read + Send + 'static> {
        self.reader
    }
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

// The backend extracts text from these three formats.
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Everything one form submission sends: its endpoint, the text fields in
/// form order, and at most one file.
#[derive(Debug)]
pub struct UploadRequest {
    pub endpoint: &'static str,
    pub fields: Vec<(String, String)>,
    pub file: Option<FileAttachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    pub hidden: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        LoadingIndicator { hidden: true }
    }
}

/// An upload form: text fields, the file input, and the optional submit
/// control and loading indicator whose state mirrors the busy flag.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<SelectedFile>,
    pub submit: Option<SubmitControl>,
    pub loading: Option<LoadingIndicator>,
}

impl UploadForm {
    pub fn new() -> UploadForm {
        UploadForm {
            submit: Some(SubmitControl::default()),
            loading: Some(LoadingIndicator::default()),
            ..UploadForm::default()
        }
    }

    pub fn field(mut self, name: &str, value: &str) -> UploadForm {
        self.set_field(name, value);
        self
    }

    pub fn with_file(mut self, file: SelectedFile) -> UploadForm {
        self.file = Some(file);
        self
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    /// Captures the current field values and opens the selected file.
    pub fn snapshot(&self, endpoint: &'static str) -> Result<UploadRequest, ClientError> {
        let file = match &self.file {
            Some(selected) => Some(selected.open()?),
            None => None,
        };
        Ok(UploadRequest {
            endpoint,
            fields: self.fields.clone(),
            file,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.submit.as_ref().map_or(false, |s| s.disabled)
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        if let Some(submit) = self.submit.as_mut() {
            submit.disabled = busy;
        }
        if let Some(loading) = self.loading.as_mut() {
            loading.hidden = !busy;
        }
    }
}
