use std::io;
use tokio::io::{AsyncRead, AsyncWrite};

use super::{Handler, ReadBuffer};
use crate::log::{debug, error};
use crate::request::{Request, RequestError};
use crate::response::{ResponseWriter, StatusCode, default_headers};

/// Read a single request from `io`.
///
/// Reads until the request is complete, bytes after the request are left unread in the buffer
/// and discarded.
///
/// # Errors
///
/// Returns [`RequestError::Incomplete`] if `io` reaches end of input before the request is
/// complete.
pub async fn read_request<R>(io: &mut R) -> Result<Request, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = ReadBuffer::new();
    let mut request = Request::new();

    while !request.is_done() {
        let read = buffer.read_from(io).await?;
        if read == 0 {
            return Err(RequestError::Incomplete(request.state()));
        }

        let parsed = request.parse(buffer.as_slice())?;
        buffer.consume(parsed);
    }

    Ok(request)
}

/// Serve a single request on `io`.
///
/// An invalid request is answered with `400 Bad Request`, otherwise the request is given to
/// `handler` along with a [`ResponseWriter`] that owns `io`. The connection is closed when
/// this function returns.
pub async fn serve_connection<IO, H>(mut io: IO, handler: &H)
where
    IO: AsyncRead + AsyncWrite + Unpin,
    H: Handler<IO>,
{
    let request = match read_request(&mut io).await {
        Ok(ok) => ok,
        Err(err) => {
            debug!("failed to read request: {err}");
            if let Err(err) = write_bad_request(ResponseWriter::new(&mut io)).await {
                debug!("failed to write bad request response: {err}");
            }
            return;
        }
    };

    debug!("{} {}", request.method(), request.target());

    if let Err(err) = handler.call(ResponseWriter::new(io), request).await {
        error!("failed to serve http: {err}");
    }
}

async fn write_bad_request<W>(mut res: ResponseWriter<W>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    res.write_status_line(StatusCode::BAD_REQUEST).await?;
    res.write_headers(&default_headers(0)).await?;
    res.shutdown().await
}
