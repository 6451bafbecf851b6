//! HTTP request handling implementation.
//!
//! A [`RequestHeader`] is produced by the header decoder once the request line and
//! the headers have been parsed; the [`Request`] pairs it with the framed body. Both
//! are immutable once built.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, Version, header};

/// The request line and headers of one request.
#[derive(Debug, Clone)]
pub struct RequestHeader {
    method: Method,
    path: String,
    version: Version,
    headers: HeaderMap,
}

impl RequestHeader {
    pub fn new(method: Method, path: impl Into<String>, version: Version, headers: HeaderMap) -> Self {
        Self { method, path: path.into(), version, headers }
    }

    /// Attaches a body to this header, converting it into a full [`Request`].
    pub fn body(self, body: Bytes) -> Request {
        Request { header: self, body }
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw request target, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns a reference to the request's headers.
    ///
    /// Lookup through [`HeaderMap`] is case-insensitive on the header name.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw `User-Agent` value, if any.
    pub fn user_agent(&self) -> Option<&HeaderValue> {
        self.headers.get(header::USER_AGENT)
    }

    /// Returns the `Accept-Encoding` value if it is present and visible ASCII.
    pub fn accept_encoding(&self) -> Option<&str> {
        self.headers.get(header::ACCEPT_ENCODING).and_then(|value| value.to_str().ok())
    }

    /// Whether the connection should stay open after this request.
    ///
    /// Persistent connections are the default; a `Connection` header listing the
    /// `close` token, in any case, turns it off.
    pub fn keep_alive(&self) -> bool {
        !wants_close(&self.headers)
    }
}

/// Whether any `Connection` header lists the `close` token.
pub(crate) fn wants_close(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .flat_map(|value| value.as_bytes().split(|b| *b == b','))
        .any(|token| token.trim_ascii().eq_ignore_ascii_case(b"close"))
}

/// A fully framed request: header plus exactly the body bytes its `Content-Length` declared.
#[derive(Debug, Clone)]
pub struct Request {
    header: RequestHeader,
    body: Bytes,
}

impl Request {
    pub fn header(&self) -> &RequestHeader {
        &self.header
    }

    pub fn method(&self) -> &Method {
        self.header.method()
    }

    pub fn path(&self) -> &str {
        self.header.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.header.headers()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_with(name: &'static str, value: &'static str) -> RequestHeader {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        RequestHeader::new(Method::GET, "/", Version::HTTP_11, headers)
    }

    #[test]
    fn keep_alive_by_default() {
        let header = RequestHeader::new(Method::GET, "/", Version::HTTP_11, HeaderMap::new());
        assert!(header.keep_alive());
    }

    #[test]
    fn connection_close_in_any_case() {
        assert!(!header_with("connection", "close").keep_alive());
        assert!(!header_with("connection", "Close").keep_alive());
        assert!(!header_with("connection", "keep-alive, CLOSE").keep_alive());
        assert!(header_with("connection", "keep-alive").keep_alive());
    }

    #[test]
    fn user_agent_is_case_insensitive() {
        let header = header_with("user-agent", "foobar/1.2.3");
        assert_eq!(header.user_agent().unwrap(), "foobar/1.2.3");
    }

    #[test]
    fn body_attaches() {
        let request = header_with("accept-encoding", "gzip").body(Bytes::from_static(b"hello"));
        assert_eq!(request.header().accept_encoding(), Some("gzip"));
        assert_eq!(&request.body()[..], b"hello");
    }
}
