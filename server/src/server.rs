//! TCP front-end.
//!
//! Each connection speaks line-delimited JSON: one request per line, one response line back.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::service::GameService;

/// Longest request line accepted, newline included.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Binds the listener and serves connections until the task is dropped.
///
/// `ready_tx` receives the bound address once the listener is up, which is how callers learn
/// the port when binding to port 0.
pub async fn run_server(
    config: ServerConfig,
    service: Arc<GameService>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let addr = listener.local_addr()?;
    log::info!("Listening on {}", addr);

    if let Some(tx) = ready_tx {
        let _ = tx.send(addr);
    }

    let sweeper = spawn_sweeper(&config, service.clone());
    let result = accept_loop(listener, service).await;
    sweeper.abort();
    result
}

async fn accept_loop(listener: TcpListener, service: Arc<GameService>) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        log::debug!("Client connected from {}", peer);

        let service = service.clone();
        tokio::spawn(async move {
            if let Err(error) = handle_connection(stream, service).await {
                log::warn!("Connection {} closed with error: {:#}", peer, error);
            } else {
                log::debug!("Client {} disconnected", peer);
            }
        });
    }
}

fn spawn_sweeper(config: &ServerConfig, service: Arc<GameService>) -> JoinHandle<()> {
    let period = config.sweep_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let purged = service.sessions().purge_expired();
            if purged > 0 {
                log::debug!("Purged {} expired games", purged);
            }
        }
    })
}

async fn handle_connection(stream: TcpStream, service: Arc<GameService>) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        if read_line(&mut reader, &mut buf).await? == 0 {
            break;
        }

        let response = if !buf.ends_with(b"\n") && buf.len() == MAX_LINE_BYTES {
            skip_rest_of_line(&mut reader, &mut buf).await?;
            let error = format!("line is longer than {} bytes", MAX_LINE_BYTES);
            service.reject(ApiError::MalformedRequest(error))
        } else {
            match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => service.handle_line(line.trim()),
                Err(error) => service.reject(ApiError::MalformedRequest(error.to_string())),
            }
        };

        let mut payload = response.to_json()?;
        payload.push('\n');
        writer.write_all(payload.as_bytes()).await?;
    }

    Ok(())
}

/// Reads up to and including the next newline, never buffering more than [`MAX_LINE_BYTES`].
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    reader.take(MAX_LINE_BYTES as u64).read_until(b'\n', buf).await
}

async fn skip_rest_of_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        buf.clear();
        if read_line(reader, buf).await? == 0 || buf.ends_with(b"\n") {
            return Ok(());
        }
    }
}
