//! HTTP Header Store.
//!
//! [`Headers`] maps case-insensitive field names to a single string value. Repeated fields are
//! folded into one comma separated value.
//!
//! [`Headers::parse`] works on chunked bytes: it consumes every complete field line found in the
//! given bytes, and reports whether the empty line terminating the header block was reached.
//! Incomplete trailing bytes are left for the next call.
use std::collections::HashMap;

use crate::common::{CRLF, find_crlf};

mod matches;
mod iter;
pub mod error;

pub use error::HeaderError;
pub use iter::Iter;

pub(crate) use matches::is_token;


/// A header field, keeping the name as it was first written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    name: String,
    value: String,
}

/// HTTP header fields.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: HashMap<String, Field>,
}

impl Headers {
    /// Create new empty [`Headers`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct field names.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there are no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of field `name`, case insensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|field| field.value.as_str())
    }

    /// Returns `true` if field `name` is present, case insensitive.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    /// Set field `name` to `value`.
    ///
    /// If the field already exists, `value` is appended to the existing value with a `,`.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.get_mut(&name.to_ascii_lowercase()) {
            Some(field) => {
                field.value.push(',');
                field.value.push_str(value);
            }
            None => self.insert_new(name, value),
        }
    }

    /// Set field `name` to `value`, overwriting any existing value.
    pub fn replace(&mut self, name: &str, value: &str) {
        match self.fields.get_mut(&name.to_ascii_lowercase()) {
            Some(field) => {
                field.value.clear();
                field.value.push_str(value);
            }
            None => self.insert_new(name, value),
        }
    }

    /// Remove field `name`, returns `true` if the field was present.
    pub fn delete(&mut self, name: &str) -> bool {
        self.fields.remove(&name.to_ascii_lowercase()).is_some()
    }

    /// Returns an iterator over `(name, value)` pairs.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.fields.values())
    }

    fn insert_new(&mut self, name: &str, value: &str) {
        self.fields.insert(
            name.to_ascii_lowercase(),
            Field {
                name: name.to_owned(),
                value: value.to_owned(),
            },
        );
    }

    /// Parse field lines from `bytes`.
    ///
    /// Returns the number of bytes consumed and whether the empty line terminating the header
    /// block was found. Returns `(0, false)` when `bytes` does not contain a complete line.
    ///
    /// Lines that were consumed must not be given again, the caller advance its buffer by the
    /// returned length.
    pub fn parse(&mut self, bytes: &[u8]) -> Result<(usize, bool), HeaderError> {
        let mut read = 0;

        loop {
            let rest = &bytes[read..];

            let Some(n) = find_crlf(rest) else {
                return Ok((read, false));
            };

            // empty line, end of header block
            if n == 0 {
                return Ok((read + CRLF.len(), true));
            }

            let (name, value) = parse_field_line(&rest[..n])?;
            self.set(name, value);

            read += n + CRLF.len();
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);

    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split a single field line, without its CRLF, into name and trimmed value.
fn parse_field_line(line: &[u8]) -> Result<(&str, &str), HeaderError> {
    let Some(colon) = line.iter().position(|&b| b == b':') else {
        return Err(HeaderError::MissingColon);
    };

    let (name, value) = (&line[..colon], &line[colon + 1..]);

    if let Some(b' ' | b'\t') = name.last() {
        return Err(HeaderError::SpaceBeforeColon);
    }

    if !is_token(name) {
        return Err(HeaderError::InvalidName);
    }

    let name = std::str::from_utf8(name).map_err(|_| HeaderError::InvalidName)?;
    let value = std::str::from_utf8(value.trim_ascii()).map_err(|_| HeaderError::InvalidValue)?;

    Ok((name, value))
}
