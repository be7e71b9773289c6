use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;

/// Accepts connections one at a time. Each is served to completion and
/// closed before the next accept.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);
    serve(listener, cfg).await
}

pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, cfg.server.name.clone(), cfg.content.clone());
        if let Err(e) = conn.run().await {
            error!("Connection error from {}: {}", peer, e);
        }
        // Dropping the connection closes the socket.
    }
}
