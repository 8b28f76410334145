//! Transport layer for the Jasper SDK.

pub mod http;

pub use http::{HttpMethod, HttpTransport, API_KEY_HEADER};
