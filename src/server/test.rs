use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;

use crate::request::{ParseError, Request, RequestError, State};
use crate::response::{ResponseWriter, StatusCode, default_headers};
use crate::server::{ReadBuffer, Server, handler_fn, read_request, serve_connection};

/// Reader that returns at most `size` bytes per read.
struct Fragmented<'a> {
    data: &'a [u8],
    size: usize,
}

impl AsyncRead for Fragmented<'_> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let data = self.data;
        let n = self.size.min(data.len()).min(buf.remaining());
        let (head, rest) = data.split_at(n);
        buf.put_slice(head);
        self.data = rest;
        Poll::Ready(Ok(()))
    }
}

async fn echo<W>(mut res: ResponseWriter<W>, req: Request) -> io::Result<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let mut headers = default_headers(req.body().len());
    headers.replace("X-Target", req.target());
    res.write_status_line(StatusCode::OK).await?;
    res.write_headers(&headers).await?;
    res.write_body(req.body()).await?;
    Ok(())
}

#[test]
fn test_read_buffer() {
    let mut buffer = ReadBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 8);

    let mut reader = &b"GET / HTTP/1.1\r\n"[..];
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

    rt.block_on(async {
        assert_eq!(buffer.read_from(&mut reader).await.unwrap(), 8);
        assert_eq!(buffer.as_slice(), b"GET / HT");

        // full, capacity doubled before reading again
        assert_eq!(buffer.read_from(&mut reader).await.unwrap(), 8);
        assert!(buffer.capacity() >= 16);
        assert_eq!(buffer.as_slice(), b"GET / HTTP/1.1\r\n");

        buffer.consume(6);
        assert_eq!(buffer.as_slice(), b"HTTP/1.1\r\n");
        assert_eq!(buffer.len(), 10);

        assert_eq!(buffer.read_from(&mut reader).await.unwrap(), 0);
    });
}

#[tokio::test]
async fn test_read_request_fragmented() {
    const INPUT: &[u8] =
        b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";

    for size in [1, 2, 3, 7, 8, 16, 64, INPUT.len()] {
        let mut io = Fragmented { data: INPUT, size };
        let req = read_request(&mut io).await.unwrap();
        assert_eq!(req.state(), State::Done, "fragment size {size}");
        assert_eq!(req.method(), "POST");
        assert_eq!(req.target(), "/submit");
        assert_eq!(req.headers().get("host"), Some("localhost:42069"));
        assert_eq!(req.body(), b"hello world!\n", "fragment size {size}");
    }
}

#[tokio::test]
async fn test_read_request_incomplete() {
    macro_rules! test {
        ($input:literal, $state:ident) => {
            let mut io = Fragmented { data: $input, size: 3 };
            match read_request(&mut io).await {
                Err(RequestError::Incomplete(state)) => assert_eq!(state, State::$state),
                Err(err) => panic!("expected `Incomplete` but returns {err}"),
                Ok(ok) => panic!("expected `Err` but returns `Ok` with {ok:?}"),
            }
        };
    }

    test!(b"", Init);
    test!(b"GET / HTTP/1.1", Init);
    test!(b"GET / HTTP/1.1\r\nHost: localhost\r\n", Headers);
    test!(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nshort", Body);
}

#[tokio::test]
async fn test_read_request_malformed() {
    let mut io = Fragmented { data: b"GET /\r\n\r\n", size: 4 };
    match read_request(&mut io).await {
        Err(RequestError::Parse(err)) => assert_eq!(err, ParseError::MalformedRequestLine),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_serve_connection() {
    let (mut client, server) = tokio::io::duplex(64);
    let handler = handler_fn(echo::<tokio::io::DuplexStream>);

    let task = tokio::spawn(async move { serve_connection(server, &handler).await });

    client
        .write_all(b"PUT /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello")
        .await
        .unwrap();

    let mut response = String::new();
    client.read_to_string(&mut response).await.unwrap();
    task.await.unwrap();

    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    let mut lines: Vec<_> = head.split("\r\n").collect();
    assert_eq!(lines.remove(0), "HTTP/1.1 200 OK");
    lines.sort();
    assert_eq!(
        lines,
        [
            "Connection: close",
            "Content-Length: 5",
            "Content-Type: text/plain",
            "X-Target: /echo",
        ]
    );
    assert_eq!(body, "hello");
}

#[tokio::test]
async fn test_serve_connection_bad_request() {
    let (mut client, server) = tokio::io::duplex(64);
    let handler = handler_fn(|_: ResponseWriter<tokio::io::DuplexStream>, _: Request| async {
        Err::<(), _>(io::Error::other("handler called for an invalid request"))
    });

    let task = tokio::spawn(async move { serve_connection(server, &handler).await });

    client.write_all(b"GET / HTTP/1.0\r\n\r\n").await.unwrap();

    let mut response = String::new();
    client.read_to_string(&mut response).await.unwrap();
    task.await.unwrap();

    let (status, rest) = response.split_once("\r\n").unwrap();
    assert_eq!(status, "HTTP/1.1 400 Bad Request");
    assert!(rest.contains("Content-Length: 0\r\n"));
    assert!(rest.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn test_serve_connection_incomplete() {
    let (mut client, server) = tokio::io::duplex(64);
    let handler = handler_fn(|_: ResponseWriter<tokio::io::DuplexStream>, _: Request| async {
        Err::<(), _>(io::Error::other("handler called for an incomplete request"))
    });

    let task = tokio::spawn(async move { serve_connection(server, &handler).await });

    // header block never terminated, then end of input
    client.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n").await.unwrap();
    client.shutdown().await.unwrap();

    let mut response = String::new();
    client.read_to_string(&mut response).await.unwrap();
    task.await.unwrap();

    let (status, rest) = response.split_once("\r\n").unwrap();
    assert_eq!(status, "HTTP/1.1 400 Bad Request");
    assert!(rest.contains("Content-Length: 0\r\n"), "{response}");
    assert!(rest.ends_with("\r\n\r\n"), "{response}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server() {
    let server = Server::bind("127.0.0.1:0", handler_fn(echo::<TcpStream>)).await.unwrap();
    let addr = server.local_addr().unwrap();
    let handle = server.serve();

    let mut tasks = Vec::new();
    for i in 0..4 {
        tasks.push(tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let target = format!("/conn/{i}");

            // request line split across writes
            stream.write_all(b"GET ").await.unwrap();
            stream.flush().await.unwrap();
            stream
                .write_all(format!("{target} HTTP/1.1\r\nHost: localhost\r\n\r\n").as_bytes())
                .await
                .unwrap();

            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
            assert!(response.contains(&format!("X-Target: {target}\r\n")), "{response}");
            assert!(response.ends_with("\r\n\r\n"), "{response}");
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    assert!(!handle.is_closed());
    handle.shutdown().await;
}

#[tokio::test]
async fn test_server_close() {
    let server = Server::bind("127.0.0.1:0", handler_fn(echo::<TcpStream>)).await.unwrap();
    let handle = server.handle();
    handle.close();
    assert!(handle.is_closed());

    // accept loop exits without accepting anything
    server.run().await;
}

#[cfg(unix)]
#[tokio::test]
async fn test_unix_server() {
    use tokio::net::{UnixListener, UnixStream};

    let path = std::env::temp_dir().join(format!("httpwire-{}.sock", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let listener = UnixListener::bind(&path).unwrap();
    let server = Server::new(listener, handler_fn(echo::<UnixStream>));
    assert_eq!(server.listener().local_addr().unwrap().as_pathname(), Some(path.as_path()));
    assert_eq!(server.local_addr().unwrap().as_pathname(), Some(path.as_path()));
    let handle = server.serve();

    let mut stream = UnixStream::connect(&path).await.unwrap();
    stream
        .write_all(b"POST /unix HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi")
        .await
        .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
    assert!(response.contains("X-Target: /unix\r\n"), "{response}");
    assert!(response.ends_with("\r\n\r\nhi"), "{response}");

    handle.shutdown().await;
    std::fs::remove_file(&path).unwrap();
}
