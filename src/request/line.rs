use crate::common::{CRLF, ParseResult, find_crlf};
use crate::headers::is_token;

use super::ParseError;

const VERSION_PREFIX: &str = "HTTP/";
const SUPPORTED_VERSION: &str = "1.1";

/// HTTP request line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    /// Version number without the `HTTP/` prefix, always `"1.1"`.
    pub version: String,
}

impl RequestLine {
    /// Parse request line from the start of `bytes`.
    ///
    /// Returns the request line and the number of bytes consumed including the CRLF, or
    /// [`ParseResult::Pending`] if no CRLF is found yet.
    pub fn parse_chunk(bytes: &[u8]) -> ParseResult<(RequestLine, usize), ParseError> {
        let Some(n) = find_crlf(bytes) else {
            return ParseResult::Pending;
        };

        match parse_reqline(&bytes[..n]) {
            Ok(line) => ParseResult::Ok((line, n + CRLF.len())),
            Err(err) => ParseResult::Err(err),
        }
    }
}

fn parse_reqline(line: &[u8]) -> Result<RequestLine, ParseError> {
    let Ok(line) = std::str::from_utf8(line) else {
        return Err(ParseError::MalformedRequestLine);
    };

    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequestLine);
    };

    if !is_token(method.as_bytes()) || target.is_empty() {
        return Err(ParseError::MalformedRequestLine);
    }

    match version.strip_prefix(VERSION_PREFIX) {
        Some(SUPPORTED_VERSION) => {}
        _ => return Err(ParseError::MalformedRequestLine),
    }

    Ok(RequestLine {
        method: method.to_owned(),
        target: target.to_owned(),
        version: SUPPORTED_VERSION.to_owned(),
    })
}
