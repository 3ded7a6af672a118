//! Error types that can occur during header parsing.

/// An error that can occur while parsing a header field line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderError {
    /// Field line have no `:` separator.
    MissingColon,
    /// Field name followed by whitespace before the `:`.
    SpaceBeforeColon,
    /// Field name is empty or contains non token character.
    InvalidName,
    /// Field value is not valid UTF-8.
    InvalidValue,
}

impl HeaderError {
    pub(crate) const fn message(&self) -> &'static str {
        match self {
            Self::MissingColon => "missing colon separator",
            Self::SpaceBeforeColon => "whitespace between field name and colon",
            Self::InvalidName => "field name is not a token",
            Self::InvalidValue => "field value is not valid utf-8",
        }
    }
}

impl std::error::Error for HeaderError {}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
