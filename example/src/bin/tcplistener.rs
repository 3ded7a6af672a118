//! Print every request received, without responding.
use clap::Parser;
use httpwire::{Request, server::read_request};
use std::io;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "tcplistener")]
#[command(about = "Print parsed HTTP requests", long_about = None)]
struct Cli {
    #[arg(short, long, default_value_t = 42069)]
    port: u16,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let listener = TcpListener::bind(("0.0.0.0", cli.port)).await?;

    loop {
        let (mut io, addr) = listener.accept().await?;
        log::info!("connection accepted from {addr}");

        tokio::spawn(async move {
            match read_request(&mut io).await {
                Ok(req) => print_request(&req),
                Err(err) => log::error!("failed to read request from {addr}: {err}"),
            }
        });
    }
}

fn print_request(req: &Request) {
    println!("Request line:");
    println!("- Method: {}", req.method());
    println!("- Target: {}", req.target());
    println!("- Version: {}", req.version());
    println!("Headers:");
    for (name, value) in req.headers() {
        println!("- {name}: {value}");
    }
    println!("Body:");
    println!("{}", String::from_utf8_lossy(req.body()));
}
