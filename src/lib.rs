use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_SERVER_ADDR: &str = "http://localhost:5000";

pub mod analysis;
pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod errors;
pub mod form;
pub mod notify;
mod reader_length;
pub mod render;

pub use analysis::AnalysisResult;
pub use coordinator::{
    SubmitEvent, Transport, TransportResponse, UploadCoordinator, UploadKind, UploadOutcome,
    UploadPage, UploadSuccess,
};
pub use errors::ClientError;
pub use form::{SelectedFile, UploadForm, UploadRequest};

use analysis::ErrorBody;
use dashboard::{CandidateScore, CategoryDistribution, EmailTemplate, JobSummary, SkillMatch};

#[derive(Debug)]
pub struct RecruitAPIClient {
    server_addr: url::Url,
    http_client: reqwest::blocking::Client,
}

impl RecruitAPIClient {
    pub fn new() -> Result<RecruitAPIClient, ClientError> {
        RecruitAPIClient::new_for_server(DEFAULT_SERVER_ADDR, None)
    }

    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new_for_server(
        server_addr: &str,
        timeout: Option<Duration>,
    ) -> Result<RecruitAPIClient, ClientError> {
        let server_addr = url::Url::parse(server_addr)?;
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(RecruitAPIClient {
            server_addr,
            http_client,
        })
    }

    pub fn server_addr(&self) -> &url::Url {
        &self.server_addr
    }

    pub fn endpoint_url(&self, path: &str) -> Result<url::Url, ClientError> {
        Ok(self.server_addr.join(path)?)
    }

    pub fn job_descriptions(&self) -> Result<Vec<JobSummary>, ClientError> {
        self.get_json("/api/job-descriptions")
    }

    pub fn candidate_scores(&self) -> Result<Vec<CandidateScore>, ClientError> {
        self.get_json("/api/candidates/scores")
    }

    pub fn skills_match(&self, candidate_id: &str) -> Result<Vec<SkillMatch>, ClientError> {
        self.get_json(&format!("/api/candidates/{candidate_id}/skills-match"))
    }

    pub fn category_distribution(&self) -> Result<CategoryDistribution, ClientError> {
        self.get_json("/api/candidates/category-distribution")
    }

    pub fn interview_request(&self, candidate_id: &str) -> Result<EmailTemplate, ClientError> {
        self.get_json(&format!("/api/email/interview-request/{candidate_id}"))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let endpoint_url = self.endpoint_url(path)?;
        debug!(endpoint = %endpoint_url, "GET");
        let resp = self.http_client.get(endpoint_url.clone()).send()?;

        let status = resp.status().as_u16();
        let body = resp.bytes()?;
        if !(200..300).contains(&status) {
            return Err(api_error(endpoint_url.into(), status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Transport for RecruitAPIClient {
    fn send(&self, request: UploadRequest) -> Result<TransportResponse, ClientError> {
        use reqwest::blocking::multipart::{Form, Part};

        let endpoint_url = self.endpoint_url(request.endpoint)?;

        let mut multipart = Form::new();
        for (name, value) in request.fields {
            multipart = multipart.text(name, value);
        }
        if let Some(file) = request.file {
            let file_name = file.file_name.clone();
            let mime_type = file.mime_type;
            let length = file.length;
            let part = Part::reader_with_length(file.into_reader(), length)
                .file_name(file_name)
                .mime_str(mime_type)?;
            multipart = multipart.part(form::FILE_FIELD, part);
        }

        let resp = self
            .http_client
            .post(endpoint_url.clone())
            .multipart(multipart)
            .send()?;

        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(TransportResponse {
            endpoint_url: endpoint_url.into(),
            status,
            body,
        })
    }
}

pub(crate) fn api_error(endpoint_url: String, status: u16, body: &[u8]) -> ClientError {
    let error_message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(msg) }) => msg,
        _ => String::from_utf8_lossy(body).into_owned(),
    };
    ClientError::Api {
        endpoint_url,
        status,
        error_message,
    }
}
