//! HTTP response handling implementation.
//!
//! Handlers produce a [`RouteResult`]; the connection pairs it with the
//! [`ResponseOptions`] negotiated from the originating request, and the pair is
//! what the response encoder turns into bytes.

use bytes::Bytes;
use http::StatusCode;
use mime::Mime;

use crate::encoding::ContentEncoding;
use crate::protocol::RequestHeader;

/// Output of a route handler.
///
/// A result either has no body at all, in which case neither `Content-Type` nor
/// `Content-Length` is written, or a typed body which may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    status: StatusCode,
    body: Option<(Mime, Bytes)>,
}

impl RouteResult {
    /// A bodiless result, which is a bare status line on the wire.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn with_body(status: StatusCode, content_type: Mime, body: impl Into<Bytes>) -> Self {
        Self { status, body: Some((content_type, body.into())) }
    }

    pub fn ok() -> Self {
        Self::empty(StatusCode::OK)
    }

    pub fn not_found() -> Self {
        Self::empty(StatusCode::NOT_FOUND)
    }

    pub fn bad_request() -> Self {
        Self::empty(StatusCode::BAD_REQUEST)
    }

    pub fn internal_error() -> Self {
        Self::empty(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> Option<&Mime> {
        self.body.as_ref().map(|(content_type, _)| content_type)
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref().map(|(_, body)| body)
    }

    pub fn into_parts(self) -> (StatusCode, Option<(Mime, Bytes)>) {
        (self.status, self.body)
    }
}

/// Per-request options the encoder needs besides the route result itself.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ResponseOptions {
    encoding: Option<ContentEncoding>,
    close: bool,
}

impl ResponseOptions {
    pub fn new(encoding: Option<ContentEncoding>, close: bool) -> Self {
        Self { encoding, close }
    }

    /// Negotiates encoding and persistence from the request headers.
    pub fn from_request(header: &RequestHeader) -> Self {
        let encoding = header.accept_encoding().and_then(ContentEncoding::negotiate);
        Self { encoding, close: !header.keep_alive() }
    }

    /// Options for a response answering a request that could not be parsed.
    pub fn closing() -> Self {
        Self { encoding: None, close: true }
    }

    pub fn encoding(&self) -> Option<ContentEncoding> {
        self.encoding
    }

    /// Whether `Connection: close` must be sent and the transport released afterwards.
    pub fn is_close(&self) -> bool {
        self.close
    }
}

/// A route result bound to its negotiated options, ready to be encoded.
#[derive(Debug, Clone)]
pub struct Response {
    result: RouteResult,
    options: ResponseOptions,
}

impl Response {
    pub fn new(result: RouteResult, options: ResponseOptions) -> Self {
        Self { result, options }
    }

    pub fn into_parts(self) -> (RouteResult, ResponseOptions) {
        (self.result, self.options)
    }
}

/// The status line and the headers of an encoded response.
///
/// Header names are written in canonical case in a fixed order:
/// `Content-Type`, `Content-Encoding`, `Connection`, `Content-Length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub(crate) status: StatusCode,
    pub(crate) content_type: Option<Mime>,
    pub(crate) content_encoding: Option<ContentEncoding>,
    pub(crate) close: bool,
}

impl ResponseHead {
    pub fn new(status: StatusCode) -> Self {
        Self { status, content_type: None, content_encoding: None, close: false }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}
