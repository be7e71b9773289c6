use tiny::config::Config;
use tiny::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let mut cfg = Config::load()?;

    let mut args = std::env::args().skip(1);
    if let Some(port) = args.next() {
        cfg.set_port(&port);
    }
    if args.next().is_some() {
        anyhow::bail!("usage: tiny [port]");
    }

    tracing::info!(root = %cfg.content.root.display(), "Serving content");

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
