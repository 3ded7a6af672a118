//! HTTP Request and its incremental parser.
//!
//! [`Request::parse`] is fed the currently buffered bytes and returns how many of them it
//! consumed. Bytes that are not consumed must be given again, followed by newly read bytes, on
//! the next call. The request is complete once [`Request::state`] is [`State::Done`].
//!
//! ```text
//! Init --request line--> Headers --empty line--> Body --Content-Length bytes--> Done
//!                                      \---------------no body------------------/
//! ```
//!
//! Any error moves the parser into [`State::Error`], which is terminal.
use bytes::BytesMut;
use std::cmp;

use crate::common::ParseResult;
use crate::headers::Headers;
use crate::log::trace;

mod line;
mod state;
mod error;

pub use line::RequestLine;
pub use state::State;
pub use error::{ParseError, RequestError};


const CONTENT_LENGTH: &str = "content-length";
const TRANSFER_ENCODING: &str = "transfer-encoding";

/// HTTP Request.
#[derive(Debug, Default)]
pub struct Request {
    line: RequestLine,
    headers: Headers,
    body: BytesMut,
    state: State,
}

impl Request {
    /// Create new empty [`Request`] in [`State::Init`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns shared reference to [`RequestLine`].
    #[inline]
    pub fn request_line(&self) -> &RequestLine {
        &self.line
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.line.method
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.line.target
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.line.version
    }

    /// Returns shared reference to [`Headers`].
    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body bytes collected so far.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns `true` if the request is completely parsed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Destruct request into [`RequestLine`], [`Headers`] and body.
    pub fn into_parts(self) -> (RequestLine, Headers, BytesMut) {
        (self.line, self.headers, self.body)
    }
}

// ===== Parser =====

impl Request {
    /// Parse as much of `bytes` as possible, returns the number of bytes consumed.
    ///
    /// Returns `Ok(0)` when more bytes are required to make progress, or when the request is
    /// already [`State::Done`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the bytes are not a valid request. The parser is then in
    /// [`State::Error`] and every subsequent call returns [`ParseError::Errored`].
    pub fn parse(&mut self, bytes: &[u8]) -> Result<usize, ParseError> {
        if self.state == State::Error {
            return Err(ParseError::Errored);
        }

        match self.parse_inner(bytes) {
            Ok(read) => Ok(read),
            Err(err) => {
                self.state = State::Error;
                Err(err)
            }
        }
    }

    fn parse_inner(&mut self, bytes: &[u8]) -> Result<usize, ParseError> {
        let mut read = 0;

        loop {
            let rest = &bytes[read..];
            if rest.is_empty() {
                break;
            }

            match self.state {
                State::Init => {
                    let (line, n) = match RequestLine::parse_chunk(rest) {
                        ParseResult::Ok(ok) => ok,
                        ParseResult::Pending => break,
                        ParseResult::Err(err) => return Err(err),
                    };
                    trace!("request line: {} {}", line.method, line.target);
                    self.line = line;
                    self.state = State::Headers;
                    read += n;
                }
                State::Headers => {
                    let (n, done) = self.headers.parse(rest)?;
                    read += n;

                    if !done {
                        break;
                    }

                    self.state = self.body_state()?;
                    trace!("header block complete, next state: {}", self.state);
                }
                State::Body => {
                    let Some(content_len) = self.content_len()? else {
                        self.state = State::Done;
                        return Ok(bytes.len());
                    };

                    if content_len == 0 {
                        return Err(ParseError::UnsupportedBodyEncoding);
                    }

                    let remaining = content_len.saturating_sub(self.body.len());
                    let n = cmp::min(remaining, rest.len());
                    self.body.extend_from_slice(&rest[..n]);
                    read += n;

                    if self.body.len() == content_len {
                        self.state = State::Done;
                    }
                }
                State::Done | State::Error => break,
            }
        }

        Ok(read)
    }

    /// State to enter once the header block is complete.
    fn body_state(&self) -> Result<State, ParseError> {
        if self.headers.contains(TRANSFER_ENCODING) {
            return Err(ParseError::UnsupportedBodyEncoding);
        }

        match self.content_len()? {
            Some(len) if len > 0 => Ok(State::Body),
            _ => Ok(State::Done),
        }
    }

    fn content_len(&self) -> Result<Option<usize>, ParseError> {
        let Some(value) = self.headers.get(CONTENT_LENGTH) else {
            return Ok(None);
        };

        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::MalformedContentLength);
        }

        match value.parse() {
            Ok(len) => Ok(Some(len)),
            Err(_) => Err(ParseError::MalformedContentLength),
        }
    }
}
