//! Types shared by the incremental parsers.

/// Outcome of parsing a chunk of bytes that may not hold a complete element yet.
#[derive(Debug)]
pub enum ParseResult<T, E> {
    /// Bytes is not sufficient for parsing, more IO read is required.
    Pending,
    /// Parse success.
    Ok(T),
    /// Parse failed.
    Err(E),
}

/// Find the first CRLF in `bytes`, returning its offset.
pub(crate) fn find_crlf(bytes: &[u8]) -> Option<usize> {
    bytes.windows(2).position(|w| w == b"\r\n")
}

pub(crate) const CRLF: &[u8] = b"\r\n";
