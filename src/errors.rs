use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Bad server address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("API endpoint {endpoint_url} responded with status {status}: {error_message}")]
    Api {
        endpoint_url: String,
        status: u16,
        error_message: String,
    },
}

impl ClientError {
    /// Status code reported by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_names_endpoint_and_status() {
        let err = ClientError::Api {
            endpoint_url: "http://localhost:5000/api/resume".into(),
            status: 400,
            error_message: "Name, email, and job ID are required".into(),
        };
        assert_eq!(
            err.to_string(),
            "API endpoint http://localhost:5000/api/resume responded with status 400: \
             Name, email, and job ID are required"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn io_error_has_no_status() {
        let err: ClientError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.status(), None);
    }
}
