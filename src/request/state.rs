use std::fmt;

/// Request parser state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Waiting for the request line.
    #[default]
    Init,
    /// Parsing header fields.
    Headers,
    /// Collecting `Content-Length` bytes of body.
    Body,
    /// Request is complete.
    Done,
    /// Parsing failed, any further parse call fails.
    Error,
}

impl State {
    /// Returns state name for diagnostics, e.g: `"headers"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            State::Init => "init",
            State::Headers => "headers",
            State::Body => "body",
            State::Done => "done",
            State::Error => "error",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
