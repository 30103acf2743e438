use std::any::Any;
use std::fs;
use std::io;

use crate::errors::ClientError;

/// A multipart part must declare its length up front, so every attachment
/// reader is paired with the number of bytes it will yield.
pub(crate) type SizedReader = (Box<dyn io::Read + Send + 'static>, u64);

fn remaining<CT: AsRef<[u8]> + 'static>(val: &dyn Any) -> Option<u64> {
    val.downcast_ref::<io::Cursor<CT>>().map(|c| {
        let total = c.get_ref().as_ref().len() as u64;
        total.saturating_sub(c.position())
    })
}

fn cursor_remaining<T: 'static>(val: &T) -> Option<u64> {
    let val = val as &dyn Any;
    remaining::<Vec<u8>>(val)
        .or_else(|| remaining::<&'static [u8]>(val))
        .or_else(|| remaining::<Box<[u8]>>(val))
        .or_else(|| remaining::<&'static str>(val))
        .or_else(|| remaining::<String>(val))
}

pub(crate) fn determine_length<T: io::Read + Send + 'static>(
    mut r: T,
) -> Result<SizedReader, ClientError> {
    if let Some(l) = cursor_remaining(&r) {
        return Ok((Box::new(r), l));
    }
    if let Some(f) = (&r as &dyn Any).downcast_ref::<fs::File>() {
        let metadata = f.metadata()?;
        if metadata.is_file() {
            let l = metadata.len();
            return Ok((Box::new(r), l));
        }
    }

    // pipes and other unsized readers get buffered
    let mut data = Vec::new();
    let amount = r.read_to_end(&mut data)?;
    Ok((Box::new(io::Cursor::new(data)), amount as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom, Write};

    #[test]
    fn cursor_length_accounts_for_position() {
        let mut cursor = io::Cursor::new(b"hello world".to_vec());
        cursor.set_position(6);
        let (mut reader, len) = determine_length(cursor).unwrap();
        assert_eq!(len, 5);
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "world");
    }

    #[test]
    fn file_length_comes_from_metadata() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"Senior Rust Engineer").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let (_, len) = determine_length(file).unwrap();
        assert_eq!(len, 20);
    }

    #[test]
    fn unsized_reader_is_buffered() {
        let chained = io::repeat(b'x').take(3).chain(io::repeat(b'y').take(2));
        let (mut reader, len) = determine_length(chained).unwrap();
        assert_eq!(len, 5);
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "xxxyy");
    }
}
