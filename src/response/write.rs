use bytes::{BufMut, BytesMut};
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::StatusCode;
use crate::headers::Headers;

const VERSION: &[u8] = b"HTTP/1.1";
const LAST_CHUNK: &[u8] = b"0\r\n";

/// HTTP/1.1 response writer.
///
/// Every method writes its part of the message to the underlying IO before returning. The
/// writer does not track message framing, the caller is responsible to write the status line,
/// the header block, then the body, in that order.
///
/// For a chunked body, each chunk is written with [`write_chunked_body`], followed by
/// [`write_chunked_body_done`] and [`write_trailers`].
///
/// [`write_chunked_body`]: ResponseWriter::write_chunked_body
/// [`write_chunked_body_done`]: ResponseWriter::write_chunked_body_done
/// [`write_trailers`]: ResponseWriter::write_trailers
pub struct ResponseWriter<W> {
    io: W,
    buf: BytesMut,
}

impl<W> ResponseWriter<W> {
    pub fn new(io: W) -> Self {
        Self {
            io,
            buf: BytesMut::with_capacity(128),
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.io
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.io
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.io
    }
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    /// Write `HTTP/1.1 <code> <reason>\r\n`.
    pub async fn write_status_line(&mut self, status: impl Into<StatusCode>) -> io::Result<()> {
        write_status_line(status.into(), &mut self.buf);
        self.write_buf().await
    }

    /// Write every field as `Name: Value\r\n`, followed by an empty line.
    pub async fn write_headers(&mut self, headers: &Headers) -> io::Result<()> {
        write_headers(headers, &mut self.buf);
        self.write_buf().await
    }

    /// Write raw body bytes, returns the number of bytes written.
    pub async fn write_body(&mut self, body: &[u8]) -> io::Result<usize> {
        self.io.write_all(body).await?;
        Ok(body.len())
    }

    /// Write a single chunk as `<hex len>\r\n<chunk>\r\n`.
    ///
    /// Nothing is written for an empty chunk, use [`write_chunked_body_done`] to end the body.
    ///
    /// Returns the number of bytes written, including the framing.
    ///
    /// [`write_chunked_body_done`]: ResponseWriter::write_chunked_body_done
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> io::Result<usize> {
        if chunk.is_empty() {
            return Ok(0);
        }

        put_hex(chunk.len(), &mut self.buf)?;
        self.buf.put_slice(b"\r\n");
        self.buf.put_slice(chunk);
        self.buf.put_slice(b"\r\n");

        let len = self.buf.len();
        self.write_buf().await?;
        Ok(len)
    }

    /// Write the last chunk, `0\r\n`.
    ///
    /// The message is not complete until the trailer section is written with
    /// [`write_trailers`].
    ///
    /// [`write_trailers`]: ResponseWriter::write_trailers
    pub async fn write_chunked_body_done(&mut self) -> io::Result<usize> {
        self.io.write_all(LAST_CHUNK).await?;
        Ok(LAST_CHUNK.len())
    }

    /// Write trailer fields, followed by an empty line.
    ///
    /// Pass empty [`Headers`] to end a chunked body without trailers.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> io::Result<()> {
        self.write_headers(trailers).await
    }

    /// Flush the underlying IO.
    pub async fn flush(&mut self) -> io::Result<()> {
        self.io.flush().await
    }

    /// Shutdown the write side of the underlying IO.
    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.io.shutdown().await
    }

    async fn write_buf(&mut self) -> io::Result<()> {
        let result = self.io.write_all(&self.buf).await;
        self.buf.clear();
        result
    }
}

impl<W> std::fmt::Debug for ResponseWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ResponseWriter").finish_non_exhaustive()
    }
}

// ===== Encoding =====

fn write_status_line<B: BufMut>(status: StatusCode, mut bufm: B) {
    bufm.put_slice(VERSION);
    bufm.put_slice(b" ");
    bufm.put_slice(itoa::Buffer::new().format(status.as_u16()).as_bytes());
    bufm.put_slice(b" ");
    bufm.put_slice(status.reason().as_bytes());
    bufm.put_slice(b"\r\n");
}

fn write_headers<B: BufMut>(headers: &Headers, mut bufm: B) {
    for (name, value) in headers {
        bufm.put_slice(name.as_bytes());
        bufm.put_slice(b": ");
        bufm.put_slice(value.as_bytes());
        bufm.put_slice(b"\r\n");
    }

    bufm.put_slice(b"\r\n");
}

/// Write `n` as lowercase hex digits.
fn put_hex<B: BufMut>(n: usize, bufm: B) -> io::Result<()> {
    use std::io::Write as _;
    write!(bufm.writer(), "{n:x}")
}
