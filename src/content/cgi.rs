//! Programs run on behalf of a client.
//!
//! The server writes only the status line and its `Server` header. Everything
//! the program prints on stdout follows on the connection unchanged, so the
//! program is responsible for its own headers, the blank line and the body.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::http::reader::LineReader;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Runs `program` with `query` bound to `query_env` in its environment and
/// copies its stdout into `out`. Blocks until the program exits.
///
/// The server's own environment is left untouched. The exit status is
/// returned for logging only.
pub async fn run_dynamic_handler<W>(
    program: &Path,
    query_env: &str,
    query: &str,
    out: &mut W,
) -> anyhow::Result<ExitStatus>
where
    W: AsyncWrite + Unpin,
{
    let mut child = Command::new(program)
        .env(query_env, query)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to run {}", program.display()))?;

    if let Some(mut stdout) = child.stdout.take() {
        let copied = tokio::io::copy(&mut stdout, out).await;
        if let Err(e) = copied {
            // Keep reaping the child even when the client went away.
            warn!(program = %program.display(), error = %e, "Lost client while relaying program output");
        }
    }
    out.flush().await.ok();

    let status = child
        .wait()
        .await
        .with_context(|| format!("failed to wait for {}", program.display()))?;
    Ok(status)
}

/// Dynamic responder: preamble, then the program's output.
pub async fn serve_dynamic<S>(
    conn: &mut LineReader<S>,
    server: &str,
    program: &Path,
    query_env: &str,
    query: &str,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let preamble = Response::dynamic_preamble(server);
    ResponseWriter::preamble(&preamble)
        .write_to_stream(conn.get_mut())
        .await?;

    match run_dynamic_handler(program, query_env, query, conn.get_mut()).await {
        Ok(status) => {
            debug!(program = %program.display(), %status, "Program exited");
        }
        Err(e) => {
            warn!(program = %program.display(), error = %e, "Program could not be run");
        }
    }

    Ok(())
}
