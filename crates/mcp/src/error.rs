//! Failures a capability can run into while talking to Jasper.
//!
//! None of these reach the client as a protocol error. Tools render them as a
//! diagnostic text block and resources as a diagnostic content item, so the
//! model on the other side always gets something it can read and relay.

use jasper_sdk::{ApiResponse, JasperError, JasperResult};
use serde_json::Value;

pub type CapabilityResult<T> = Result<T, CapabilityError>;

#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    /// Transport failure or non-success HTTP status.
    #[error("Failed to make request to Jasper AI for {capability}: {source}")]
    Request {
        capability: &'static str,
        #[source]
        source: JasperError,
    },

    /// The API answered without any JSON body.
    #[error("Failed to make request to Jasper AI for {capability}.")]
    NoContent { capability: &'static str },

    /// The response envelope carried an `error`.
    #[error("Jasper AI Error: {message}")]
    Remote { message: String },

    #[error("Jasper AI Error applying style: {message}. Full response: {response}")]
    StyleRejected { message: String, response: Value },
}

/// Data extracted from a successful response.
#[derive(Debug)]
pub enum Payload<T> {
    /// `data` had the expected shape.
    Data(T),
    /// The body did not match; keep it for a best-effort rendering.
    Raw(Value),
}

/// Turn a typed API result into its payload, or the failure to report.
pub fn expect_payload<T>(
    capability: &'static str,
    result: JasperResult<ApiResponse<T>>,
) -> CapabilityResult<Payload<T>> {
    match result.map_err(|source| CapabilityError::Request { capability, source })? {
        ApiResponse::Success(data) => Ok(Payload::Data(data)),
        ApiResponse::Unexpected(raw) => Ok(Payload::Raw(raw)),
        ApiResponse::Failure { message, .. } => Err(CapabilityError::Remote { message }),
        ApiResponse::NoContent => Err(CapabilityError::NoContent { capability }),
    }
}

/// Text shown when a response arrived in a shape we cannot format.
pub fn unexpected_shape(capability: &str, raw: &Value) -> String {
    format!(
        "Unexpected response format from Jasper AI for {}. Response: {}",
        capability, raw
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jasper_sdk::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_request_error_message() {
        let err = CapabilityError::Request {
            capability: "apply-style",
            source: JasperError::Api {
                status: 500,
                method: HttpMethod::Post,
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to make request to Jasper AI for apply-style: \
             Jasper API HTTP error! Status: 500, Method: POST"
        );
    }

    #[test]
    fn test_expect_payload_maps_every_variant() {
        let ok = expect_payload("t", Ok(ApiResponse::Success(1)));
        assert!(matches!(ok, Ok(Payload::Data(1))));

        let raw = expect_payload::<i32>("t", Ok(ApiResponse::Unexpected(json!({"x": 1}))));
        assert!(matches!(raw, Ok(Payload::Raw(_))));

        let failed = expect_payload::<i32>(
            "t",
            Ok(ApiResponse::Failure {
                message: "nope".to_string(),
                raw: json!({"error": "nope"}),
            }),
        );
        assert_eq!(failed.unwrap_err().to_string(), "Jasper AI Error: nope");

        let empty = expect_payload::<i32>("t", Ok(ApiResponse::NoContent));
        assert_eq!(
            empty.unwrap_err().to_string(),
            "Failed to make request to Jasper AI for t."
        );

        let missing = expect_payload::<i32>("t", Err(JasperError::MissingApiKey));
        assert!(matches!(missing, Err(CapabilityError::Request { .. })));
    }
}
