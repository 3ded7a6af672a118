use std::io;

use crate::{request::Request, response::ResponseWriter};

/// Application logic invoked once per parsed request.
///
/// The handler decides the status code, headers and body framing. The connection is closed
/// once the returned future completes and the [`ResponseWriter`] is dropped.
pub trait Handler<IO> {
    type Future: Future<Output = io::Result<()>>;

    fn call(&self, res: ResponseWriter<IO>, req: Request) -> Self::Future;
}

/// Create [`Handler`] from an async function.
///
/// ```no_run
/// use httpwire::{Request, ResponseWriter, StatusCode, handler_fn, response::default_headers};
/// use tokio::net::TcpStream;
///
/// async fn hello(mut res: ResponseWriter<TcpStream>, _: Request) -> std::io::Result<()> {
///     res.write_status_line(StatusCode::OK).await?;
///     res.write_headers(&default_headers(5)).await?;
///     res.write_body(b"hello").await?;
///     Ok(())
/// }
///
/// let handler = handler_fn(hello);
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F> {
    HandlerFn { f }
}

/// [`Handler`] created by [`handler_fn`].
#[derive(Debug, Clone)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut, IO> Handler<IO> for HandlerFn<F>
where
    F: Fn(ResponseWriter<IO>, Request) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    type Future = Fut;

    #[inline]
    fn call(&self, res: ResponseWriter<IO>, req: Request) -> Self::Future {
        (self.f)(res, req)
    }
}
