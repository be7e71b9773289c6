use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::http::mime::content_type_for;
use crate::http::reader::LineReader;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Sends a static file: the response head, then exactly `size` bytes of it.
///
/// `size` comes from the earlier status query and is not re-measured, so a
/// file that shrinks meanwhile yields a short body.
pub async fn serve_static<S>(
    conn: &mut LineReader<S>,
    server: &str,
    path: &Path,
    size: u64,
) -> anyhow::Result<u64>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    let content_type = content_type_for(&path.to_string_lossy());
    let head = Response::static_head(server, size, content_type);
    let mut writer = ResponseWriter::new(&head);
    let shown = String::from_utf8_lossy(writer.as_bytes());
    debug!(head = %shown.trim_end(), "Response headers");
    writer.write_to_stream(conn.get_mut()).await?;

    let mut body = file.take(size);
    let sent = tokio::io::copy(&mut body, conn.get_mut())
        .await
        .with_context(|| format!("failed to send {}", path.display()))?;
    conn.get_mut().flush().await?;

    Ok(sent)
}
