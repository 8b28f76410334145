//! Error types for the Jasper SDK.

use crate::transport::HttpMethod;

/// Result type for SDK operations.
pub type JasperResult<T> = Result<T, JasperError>;

/// Error types that can occur when calling the Jasper API.
#[derive(Debug, thiserror::Error)]
pub enum JasperError {
    /// The request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Jasper API HTTP error! Status: {status}, Method: {method}")]
    Api { status: u16, method: HttpMethod },

    /// No API key was configured for the client.
    #[error("JASPER_API_KEY environment variable is not set.")]
    MissingApiKey,

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl JasperError {
    /// HTTP status code carried by the error, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = JasperError::Api {
            status: 401,
            method: HttpMethod::Post,
        };
        assert_eq!(
            err.to_string(),
            "Jasper API HTTP error! Status: 401, Method: POST"
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_missing_key_has_no_status() {
        assert_eq!(JasperError::MissingApiKey.status(), None);
    }
}
