//! HTTP/1.1 server toolkit.
//!
//! - [`headers`] contains the header store and the header block parser
//! - [`request`] contains the incremental request parser
//! - [`response`] contains the response writer, including chunked framing helpers
//! - [`server`] contains the connection handler and the accept loop
#![warn(missing_debug_implementations)]

mod log;

pub mod common;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use headers::Headers;
pub use request::Request;
pub use response::{ResponseWriter, StatusCode};
pub use server::{Server, ServerHandle, handler_fn};
