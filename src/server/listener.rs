use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::movies::MovieProvider;
use crate::router::Router;

/// Binds `cfg.listen_addr` and serves connections until the task is dropped.
///
/// Failing to bind is the only error this returns.
pub async fn run<P: MovieProvider>(cfg: &ServerConfig, router: Arc<Router<P>>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("Could not listen on {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg, router).await;
    Ok(())
}

/// Accept loop: one task per connection, at most `cfg.max_connections` at once.
///
/// Connections over the limit get a 503 and are closed straight away.
pub async fn serve<P: MovieProvider>(listener: TcpListener, cfg: &ServerConfig, router: Arc<Router<P>>) {
    let permits = Arc::new(Semaphore::new(cfg.max_connections.max(1)));
    let read_timeout = cfg.read_timeout();
    let request_timeout = cfg.request_timeout();

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let Ok(permit) = permits.clone().try_acquire_owned() else {
            tracing::warn!("Connection limit reached, rejecting {}", peer);
            tokio::spawn(reject(socket));
            continue;
        };

        let router = router.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let mut conn = Connection::new(socket, router).with_timeouts(read_timeout, request_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

async fn reject(mut socket: TcpStream) {
    let mut writer = ResponseWriter::new(&Response::error(StatusCode::ServiceUnavailable));
    if let Err(e) = writer.write_to_stream(&mut socket).await {
        tracing::debug!("Failed to send 503: {}", e);
    }
}
