/// HTTP request method.
///
/// Only GET is served. Anything else keeps its original spelling so it can be
/// echoed back in the error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    Other(String),
}

impl Method {
    /// Parses a method token, comparing against GET case-insensitively.
    ///
    /// ```
    /// # use tiny::http::request::Method;
    /// assert_eq!(Method::from_token("get"), Method::GET);
    /// assert_eq!(Method::from_token("POST"), Method::Other("POST".into()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        if s.eq_ignore_ascii_case("GET") {
            Method::GET
        } else {
            Method::Other(s.to_string())
        }
    }
}

/// The request line of one transaction. Headers are never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Raw request target, e.g. `/cgi-bin/adder?1&2`
    pub target: String,
    /// HTTP version token, e.g. `HTTP/1.0`
    pub version: String,
}

impl Request {
    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}
