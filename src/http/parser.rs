use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::http::reader::LineReader;
use crate::http::request::{Method, Request};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The request line has fewer than three tokens or is not text
    InvalidRequest,
}

/// Splits a request line into method, target and version.
///
/// Tokens past the third are ignored.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidRequest)?;
    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    Ok(Request {
        method: Method::from_token(method),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Reads and discards header lines up to and including the empty line.
///
/// Returns the number of header lines skipped. End of stream also ends the
/// header section.
pub async fn read_request_headers<S>(reader: &mut LineReader<S>) -> anyhow::Result<usize>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut skipped = 0;
    while let Some(line) = reader.read_line().await? {
        if is_blank_line(&line) {
            break;
        }
        let header = String::from_utf8_lossy(&line);
        debug!(header = %header.trim_end(), "Discarding request header");
        skipped += 1;
    }
    Ok(skipped)
}

fn is_blank_line(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}
