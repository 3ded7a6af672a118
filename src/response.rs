//! HTTP Response
use crate::headers::Headers;

mod status;
mod write;

pub use status::StatusCode;
pub use write::ResponseWriter;


/// Returns the baseline response headers.
///
/// Contains `Content-Length`, `Connection: close` and `Content-Type: text/plain`, callers
/// replace them as needed.
pub fn default_headers(content_len: usize) -> Headers {
    let mut headers = Headers::new();
    headers.set("Content-Length", itoa::Buffer::new().format(content_len));
    headers.set("Connection", "close");
    headers.set("Content-Type", "text/plain");
    headers
}
