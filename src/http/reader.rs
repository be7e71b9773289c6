//! Buffered line-oriented access to a byte stream.
//!
//! Reads go through an internal buffer so that bytes fetched past the end of
//! a line are replayed by the next call. Writes go straight to the stream.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Longest line handed out by a single `read_line` call.
pub const MAX_LINE: usize = 8192;

const READ_CHUNK: usize = 4096;

pub struct LineReader<S> {
    stream: S,
    buffer: BytesMut,
}

impl<S> LineReader<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
        }
    }

    /// Returns the next line including its `\n` terminator.
    ///
    /// `Ok(None)` means the stream ended before any byte of a new line was
    /// seen. A final line without terminator is returned as is, and a line
    /// longer than `MAX_LINE` is handed out in `MAX_LINE` sized pieces.
    pub async fn read_line(&mut self) -> anyhow::Result<Option<Vec<u8>>> {
        let mut scanned = 0;
        loop {
            let window = self.buffer.len().min(MAX_LINE);
            if let Some(pos) = self.buffer[scanned..window].iter().position(|b| *b == b'\n') {
                let end = scanned + pos + 1;
                return Ok(Some(self.buffer.split_to(end).to_vec()));
            }
            if self.buffer.len() >= MAX_LINE {
                return Ok(Some(self.buffer.split_to(MAX_LINE).to_vec()));
            }
            scanned = self.buffer.len();

            if self.fill().await? == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let rest = self.buffer.split().to_vec();
                return Ok(Some(rest));
            }
        }
    }

    /// Reads exactly `n` bytes, draining buffered bytes first.
    pub async fn read_exact(&mut self, n: usize) -> anyhow::Result<Vec<u8>> {
        while self.buffer.len() < n {
            if self.fill().await? == 0 {
                anyhow::bail!(
                    "stream closed after {} of {} bytes",
                    self.buffer.len(),
                    n
                );
            }
        }
        let mut out = vec![0u8; n];
        self.buffer.copy_to_slice(&mut out);
        Ok(out)
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(bytes).await?;
        Ok(())
    }

    pub async fn flush(&mut self) -> anyhow::Result<()> {
        self.stream.flush().await?;
        Ok(())
    }

    /// Direct access to the stream, for responders that copy into it.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    async fn fill(&mut self) -> anyhow::Result<usize> {
        let mut temp = [0u8; READ_CHUNK];
        let n = self.stream.read(&mut temp).await?;
        self.buffer.extend_from_slice(&temp[..n]);
        Ok(n)
    }
}
