//! HTTP/1.1 server.
//!
//! [`Server`] accepts connections from a [`Listener`] and spawns one task per connection. Each
//! connection serves exactly one request, see [`serve_connection`].
use std::{
    future::poll_fn,
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::{
    net::{TcpListener, ToSocketAddrs},
    sync::Notify,
    task::JoinHandle,
};

use crate::log::{error, info};

mod buffer;
mod connection;
mod handler;
mod listener;

pub use buffer::ReadBuffer;
pub use connection::{read_request, serve_connection};
pub use handler::{Handler, HandlerFn, handler_fn};
pub use listener::Listener;

#[cfg(test)]
mod test;

/// HTTP/1.1 server.
pub struct Server<L, H> {
    listener: L,
    handler: Arc<H>,
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    closed: AtomicBool,
    notify: Notify,
}

impl Shared {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<H> Server<TcpListener, H> {
    /// Bind a TCP listener to `addr`.
    pub async fn bind(addr: impl ToSocketAddrs, handler: H) -> io::Result<Self> {
        Ok(Self::new(TcpListener::bind(addr).await?, handler))
    }
}

impl<L, H> Server<L, H> {
    pub fn new(listener: L, handler: H) -> Self {
        Self {
            listener,
            handler: Arc::new(handler),
            shared: Arc::default(),
        }
    }

    #[inline]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Returns a handle that can close this server.
    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shared: Arc::clone(&self.shared),
            task: None,
        }
    }
}

impl<L: Listener, H> Server<L, H> {
    pub fn local_addr(&self) -> io::Result<L::Addr> {
        self.listener.local_addr()
    }
}

impl<L, H> Server<L, H>
where
    L: Listener<Stream: Send + 'static> + Send + Sync + 'static,
    H: Handler<L::Stream, Future: Send> + Send + Sync + 'static,
{
    /// Spawn the accept loop, returns a handle to close it.
    ///
    /// Must be called within tokio runtime.
    pub fn serve(self) -> ServerHandle {
        let mut handle = self.handle();
        handle.task = Some(tokio::spawn(self.run()));
        handle
    }

    /// Run the accept loop until the server is closed.
    ///
    /// Accept errors are logged and the loop continues. Connections that are already accepted
    /// are not cancelled when the server is closed.
    pub async fn run(self) {
        let Self { listener, handler, shared } = self;

        while !shared.is_closed() {
            let accepted = tokio::select! {
                biased;
                _ = shared.notify.notified() => continue,
                accepted = poll_fn(|cx| listener.poll_accept(cx)) => accepted,
            };

            match accepted {
                Ok((io, _addr)) => {
                    let handler = Arc::clone(&handler);
                    tokio::spawn(async move {
                        serve_connection(io, &*handler).await;
                    });
                }
                Err(err) => {
                    if shared.is_closed() {
                        break;
                    }
                    error!("failed to accept connection: {err}");
                }
            }
        }

        info!("server closed");
    }
}

impl<L, H> std::fmt::Debug for Server<L, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Server").finish_non_exhaustive()
    }
}

// ===== ServerHandle =====

/// Handle to close a [`Server`].
#[derive(Debug)]
pub struct ServerHandle {
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Stop accepting connections, the listener is dropped once the accept loop exits.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
        self.shared.notify.notify_one();
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// Close the server and wait for the accept loop spawned by [`Server::serve`] to exit.
    pub async fn shutdown(mut self) {
        self.close();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                error!("accept loop failed: {err}");
            }
        }
    }
}
