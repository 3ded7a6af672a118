use clap::Parser;
use httpwire::{
    Headers, Request, ResponseWriter, Server, StatusCode, handler_fn, response::default_headers,
};
use ring::digest;
use std::{io, path::PathBuf, sync::Arc};
use tokio::net::TcpStream;

type Writer = ResponseWriter<TcpStream>;

/// Size of each proxied chunk.
const CHUNK_SIZE: usize = 32;

#[derive(Parser, Debug)]
#[command(name = "httpserver")]
#[command(about = "Demo server for the httpwire HTTP/1.1 stack", long_about = None)]
struct Cli {
    #[arg(short, long, default_value_t = 42069)]
    port: u16,

    /// Directory containing `vim.mp4`.
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Base url for `/httpbin/*` requests.
    #[arg(short, long, default_value = "https://httpbin.org")]
    upstream: String,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let app = Arc::new(App {
        assets: cli.assets,
        upstream: cli.upstream.trim_end_matches('/').to_owned(),
        client: reqwest::Client::new(),
    });

    let handler = handler_fn(move |res: Writer, req: Request| {
        let app = Arc::clone(&app);
        async move { app.route(res, req).await }
    });

    let server = Server::bind(("0.0.0.0", cli.port), handler).await?;
    let handle = server.serve();
    log::info!("Server started on port {}", cli.port);

    tokio::signal::ctrl_c().await?;
    handle.shutdown().await;
    log::info!("Server gracefully stopped");

    Ok(())
}

struct App {
    assets: PathBuf,
    upstream: String,
    client: reqwest::Client,
}

impl App {
    async fn route(&self, res: Writer, req: Request) -> io::Result<()> {
        let target = req.target();

        if target == "/yourproblem" {
            return respond_html(res, StatusCode::BAD_REQUEST, BAD_REQUEST_HTML).await;
        }
        if target == "/myproblem" {
            return respond_html(res, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_HTML).await;
        }
        if let Some(path) = target.strip_prefix("/httpbin/") {
            return self.proxy(res, path).await;
        }
        if target == "/video" {
            return self.video(res).await;
        }

        respond_html(res, StatusCode::OK, OK_HTML).await
    }

    /// Stream upstream response as chunked body, with its digest and length as trailers.
    async fn proxy(&self, mut res: Writer, path: &str) -> io::Result<()> {
        let url = format!("{}/{path}", self.upstream);

        let mut upstream = match self.client.get(&url).send().await {
            Ok(ok) => ok,
            Err(err) => {
                log::error!("upstream request to {url} failed: {err}");
                return respond_html(res, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_HTML)
                    .await;
            }
        };

        let mut headers = default_headers(0);
        headers.delete("Content-Length");
        headers.set("Transfer-Encoding", "chunked");
        headers.set("Trailer", "X-Content-SHA256");
        headers.set("Trailer", "X-Content-Length");

        res.write_status_line(StatusCode::OK).await?;
        res.write_headers(&headers).await?;

        let mut sha256 = digest::Context::new(&digest::SHA256);
        let mut len = 0;

        loop {
            let chunk = match upstream.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(err) => {
                    log::warn!("upstream body from {url} ended early: {err}");
                    break;
                }
            };

            for part in chunk.chunks(CHUNK_SIZE) {
                sha256.update(part);
                len += part.len();
                res.write_chunked_body(part).await?;
            }
        }

        res.write_chunked_body_done().await?;

        let mut trailers = Headers::new();
        trailers.set("X-Content-SHA256", &hex::encode(sha256.finish()));
        trailers.set("X-Content-Length", &len.to_string());
        res.write_trailers(&trailers).await
    }

    async fn video(&self, mut res: Writer) -> io::Result<()> {
        let path = self.assets.join("vim.mp4");

        let video = match tokio::fs::read(&path).await {
            Ok(ok) => ok,
            Err(err) => {
                log::error!("failed to read {}: {err}", path.display());
                return respond_html(res, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_HTML)
                    .await;
            }
        };

        let mut headers = default_headers(video.len());
        headers.replace("Content-Type", "video/mp4");

        res.write_status_line(StatusCode::OK).await?;
        res.write_headers(&headers).await?;
        res.write_body(&video).await?;
        Ok(())
    }
}

async fn respond_html(mut res: Writer, status: StatusCode, body: &str) -> io::Result<()> {
    let mut headers = default_headers(body.len());
    headers.replace("Content-Type", "text/html");

    res.write_status_line(status).await?;
    res.write_headers(&headers).await?;
    res.write_body(body.as_bytes()).await?;
    Ok(())
}

const OK_HTML: &str = "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>
";

const BAD_REQUEST_HTML: &str = "<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>
";

const INTERNAL_ERROR_HTML: &str = "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>
";
