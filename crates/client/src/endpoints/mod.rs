//! HTTP request plumbing used by [`crate::HttpClient`].

mod request;
pub mod url_encoding;

pub use request::{read_json, send_request};
pub use url_encoding::encode_path_segment;
