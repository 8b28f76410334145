//! Decoding of the `{data, error}` envelope the Jasper API wraps responses in.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Outcome of one Jasper API call, typed per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// `data` was present and had the expected shape.
    Success(T),
    /// The envelope carried a non-null `error`.
    Failure { message: String, raw: Value },
    /// A JSON body arrived but `data` was missing or had another shape.
    Unexpected(Value),
    /// The API answered without JSON content (for example `204 No Content`).
    NoContent,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Classify a raw response body returned by the transport.
    pub fn from_body(body: Option<Value>) -> Self {
        let Some(raw) = body else {
            return Self::NoContent;
        };

        if let Some(message) = envelope_error(&raw) {
            return Self::Failure { message, raw };
        }

        match raw.get("data").filter(|data| !data.is_null()) {
            Some(data) => match T::deserialize(data) {
                Ok(data) => Self::Success(data),
                Err(e) => {
                    tracing::debug!(error = %e, "Jasper API data did not match the expected shape");
                    Self::Unexpected(raw)
                }
            },
            None => Self::Unexpected(raw),
        }
    }
}

/// Error message carried by the envelope, if any.
///
/// `null`, `false` and the empty string all mean "no error".
fn envelope_error(raw: &Value) -> Option<String> {
    match raw.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
