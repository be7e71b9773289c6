//! Interactive echo client: sends each stdin line, prints the reply line.

use anyhow::Context;
use tiny::http::reader::LineReader;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        anyhow::bail!("usage: {} <host> <port>", args[0]);
    }
    let addr = format!("{}:{}", args[1], args[2]);

    let stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("failed to connect to {addr}"))?;
    tracing::info!("Connected to {}", addr);
    let mut conn = LineReader::new(stream);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = stdin.next_line().await? {
        conn.write_all(format!("{line}\n").as_bytes()).await?;
        match conn.read_line().await? {
            Some(reply) => {
                stdout.write_all(&reply).await?;
                stdout.flush().await?;
            }
            None => break,
        }
    }

    Ok(())
}
