use bytes::{Buf, BytesMut};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

const INITIAL_CAPACITY: usize = 8;

/// Growable read buffer.
///
/// Bytes are appended by [`read_from`] and removed from the front by [`consume`]. The capacity
/// is doubled whenever the buffer is full before a read.
///
/// [`read_from`]: ReadBuffer::read_from
/// [`consume`]: ReadBuffer::consume
pub struct ReadBuffer {
    buf: BytesMut,
}

impl Default for ReadBuffer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ReadBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity.max(1)),
        }
    }

    /// Returns the unconsumed bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Remove the first `n` bytes, the remaining bytes are moved to the front.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than [`len`][ReadBuffer::len].
    pub fn consume(&mut self, n: usize) {
        self.buf.advance(n);
    }

    /// Make sure there is spare capacity to read into, doubling the capacity if the buffer is
    /// full.
    pub fn ensure_capacity(&mut self) {
        if self.buf.len() == self.buf.capacity() {
            // `reserve` reclaims consumed space at the front before allocating
            let additional = self.buf.capacity().max(INITIAL_CAPACITY);
            self.buf.reserve(additional);
        }
    }

    /// Read from `io` into the spare capacity, returns the number of bytes read.
    ///
    /// Returns `Ok(0)` only when `io` reached end of input.
    pub async fn read_from<R>(&mut self, io: &mut R) -> io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        self.ensure_capacity();
        io.read_buf(&mut self.buf).await
    }
}

impl std::fmt::Debug for ReadBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ReadBuffer")
            .field("len", &self.buf.len())
            .field("capacity", &self.buf.capacity())
            .finish()
    }
}
