use std::{fmt, io};

use super::State;
use crate::headers::HeaderError;

/// Request parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request line is not exactly `<method> <target> HTTP/1.1`.
    MalformedRequestLine,
    /// Invalid header field line.
    MalformedHeader(HeaderError),
    /// `Content-Length` is not a non-negative integer.
    MalformedContentLength,
    /// Request body is not delimited by `Content-Length`.
    UnsupportedBodyEncoding,
    /// Parser is already in error state.
    Errored,
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedHeader(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MalformedRequestLine => f.write_str("malformed request-line"),
            Self::MalformedHeader(err) => write!(f, "malformed header: {err}"),
            Self::MalformedContentLength => f.write_str("malformed content-length"),
            Self::UnsupportedBodyEncoding => f.write_str("unsupported body encoding"),
            Self::Errored => f.write_str("request parser in error state"),
        }
    }
}

impl From<HeaderError> for ParseError {
    fn from(value: HeaderError) -> Self {
        Self::MalformedHeader(value)
    }
}

// ===== RequestError =====

/// An error that can occur while reading a request from IO.
#[derive(Debug)]
pub enum RequestError {
    /// Request bytes are invalid.
    Parse(ParseError),
    /// IO reached end of input before the request is complete.
    Incomplete(State),
    /// IO error.
    Io(io::Error),
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Incomplete(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            Self::Incomplete(state) => write!(f, "incomplete request, in state: {state}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl From<ParseError> for RequestError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<io::Error> for RequestError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
