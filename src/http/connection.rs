use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, warn};

use crate::config::ContentConfig;
use crate::content::cgi::serve_dynamic;
use crate::content::resource;
use crate::content::static_files::serve_static;
use crate::content::target::{self, ResolvedTarget};
use crate::http::error::DispatchError;
use crate::http::parser::{parse_request_line, read_request_headers};
use crate::http::reader::LineReader;
use crate::http::request::{Method, Request};
use crate::http::writer::ResponseWriter;

/// One request/response transaction on one connection.
pub struct Connection<S> {
    conn: LineReader<S>,
    server_name: String,
    content: ContentConfig,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Failed(DispatchError),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, server_name: impl Into<String>, content: ContentConfig) -> Self {
        Self {
            conn: LineReader::new(stream),
            server_name: server_name.into(),
            content,
            state: ConnectionState::Reading,
        }
    }

    /// Runs exactly one transaction. The caller closes the connection.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = self.read_request().await?;
                }

                ConnectionState::Processing(req) => {
                    if let Err(e) = self.dispatch(&req).await? {
                        self.state = ConnectionState::Failed(e);
                    }
                }

                ConnectionState::Failed(err) => {
                    self.respond_error(&err).await;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.conn.into_inner()
    }

    async fn read_request(&mut self) -> anyhow::Result<ConnectionState> {
        let Some(line) = self.conn.read_line().await? else {
            // Client closed connection
            return Ok(ConnectionState::Closed);
        };
        let shown = String::from_utf8_lossy(&line).trim_end().to_string();
        info!(request = %shown, "Request line");

        let req = match parse_request_line(&line) {
            Ok(req) => req,
            Err(_) => return Ok(ConnectionState::Failed(DispatchError::BadRequest(shown))),
        };

        if let Method::Other(method) = &req.method {
            return Ok(ConnectionState::Failed(DispatchError::UnsupportedMethod(
                method.clone(),
            )));
        }

        read_request_headers(&mut self.conn).await?;
        Ok(ConnectionState::Processing(req))
    }

    /// Resolves, validates and serves the target. The outer result carries
    /// transport failures, the inner one protocol failures.
    async fn dispatch(&mut self, req: &Request) -> anyhow::Result<Result<(), DispatchError>> {
        let resolved = target::resolve(&req.target, &self.content);
        let meta = match resource::inspect(&resolved).await {
            Ok(meta) => meta,
            Err(e) => return Ok(Err(e)),
        };

        match resolved {
            ResolvedTarget::Static { path } => {
                let sent = serve_static(&mut self.conn, &self.server_name, &path, meta.size).await?;
                info!(status = 200, path = %path.display(), bytes = sent, "Served static file");
            }
            ResolvedTarget::Dynamic { program, query } => {
                serve_dynamic(
                    &mut self.conn,
                    &self.server_name,
                    &program,
                    &self.content.query_env,
                    &query,
                )
                .await?;
                info!(status = 200, program = %program.display(), "Served dynamic content");
            }
        }

        Ok(Ok(()))
    }

    /// Writes the error page. Write failures end the transaction quietly.
    async fn respond_error(&mut self, err: &DispatchError) {
        info!(status = err.status().as_u16(), error = %err, "Responding with error");
        let response = err.to_response();
        let mut writer = ResponseWriter::new(&response);
        if let Err(e) = writer.write_to_stream(self.conn.get_mut()).await {
            warn!(error = %e, "Failed to write error response");
        }
    }
}
