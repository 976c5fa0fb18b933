use std::{net::SocketAddr, str::FromStr};

use carbon_http_response::{Response, ResponseError, WireTransport, explain};
use tokio::{
    io::AsyncReadExt,
    net::{TcpListener, TcpStream},
};

fn not_found() -> Result<Response, ResponseError> {
    let mut res = Response::new();
    res.set_html_body("<h3>404 Not Found</h3>")
        .set_headers([("X-Powered", "Pradeep"), ("X-Accept", "application/json")])
        .set_status_code(404)?
        .set_status_message("You Okay??");
    Ok(res)
}

async fn handle_connection(mut stream: TcpStream, addr: SocketAddr) -> Result<(), ResponseError> {
    // The request itself is not looked at, every path is missing
    let mut buf = [0u8; 4096];
    let n = stream
        .read(&mut buf)
        .await
        .map_err(|err| ResponseError::Transport(err.into()))?;
    log::info!("{addr} sent {n} bytes");

    let mut transport = WireTransport::new();
    not_found()?.send(&mut transport)?;
    transport.flush_to(&mut stream).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = std::env::args().nth(1).unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let addr = SocketAddr::from_str(&addr)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    log::info!("{}", explain(Some(900)));

    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on {addr}");
    loop {
        let (stream, addr) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, addr).await {
                log::warn!("{addr}: {err}");
            }
        });
    }
}
