//! Protocol-level failures and the error page reported for them.

use std::path::PathBuf;

use thiserror::Error;

use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// A failure that ends a transaction with an error page.
///
/// Transport failures are not represented here; those abort the
/// transaction without a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("malformed request line: {0}")]
    BadRequest(String),
    #[error("method not implemented: {0}")]
    UnsupportedMethod(String),
    #[error("no such resource: {}", .0.display())]
    NotFound(PathBuf),
    #[error("file not readable: {}", .0.display())]
    StaticForbidden(PathBuf),
    #[error("program not executable: {}", .0.display())]
    DynamicForbidden(PathBuf),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::BadRequest(_) => StatusCode::BadRequest,
            DispatchError::UnsupportedMethod(_) => StatusCode::NotImplemented,
            DispatchError::NotFound(_) => StatusCode::NotFound,
            DispatchError::StaticForbidden(_) | DispatchError::DynamicForbidden(_) => {
                StatusCode::Forbidden
            }
        }
    }

    pub fn long_message(&self) -> &'static str {
        match self {
            DispatchError::BadRequest(_) => "Tiny couldn't parse the request line",
            DispatchError::UnsupportedMethod(_) => "Tiny does not implement this method",
            DispatchError::NotFound(_) => "Tiny couldn't find this file",
            DispatchError::StaticForbidden(_) => "Tiny couldn't read the file",
            DispatchError::DynamicForbidden(_) => "Tiny couldn't run the CGI program",
        }
    }

    /// What the error page names as the offending item.
    pub fn cause(&self) -> String {
        match self {
            DispatchError::BadRequest(s) | DispatchError::UnsupportedMethod(s) => s.clone(),
            DispatchError::NotFound(p)
            | DispatchError::StaticForbidden(p)
            | DispatchError::DynamicForbidden(p) => p.display().to_string(),
        }
    }

    pub fn to_response(&self) -> Response {
        error_response(&self.cause(), self.status(), self.long_message())
    }
}

pub fn error_page(cause: &str, status: StatusCode, long_message: &str) -> String {
    format!(
        "<html><title>Tiny Error</title><body bgcolor=\"ffffff\">\r\n\
         {}: {}\r\n\
         <p>{}: {}\r\n\
         <hr><em>The Tiny Web server</em>\r\n",
        status.as_u16(),
        status.reason_phrase(),
        long_message,
        cause
    )
}

/// Complete error response: status line, content type, length and page.
pub fn error_response(cause: &str, status: StatusCode, long_message: &str) -> Response {
    ResponseBuilder::new(status)
        .header("Content-type", "text/html")
        .sized_body(error_page(cause, status, long_message).into_bytes())
        .build()
}
