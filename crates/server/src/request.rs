use bytes::Bytes;
use raw_http::protocol::{Request, RequestHeader};

/// What a route handler sees of a request: the request itself and the part of
/// its path left over after the route's prefix.
#[derive(Debug)]
pub struct RequestContext<'req> {
    request: &'req Request,
    tail: &'req str,
}

impl<'req> RequestContext<'req> {
    pub fn new(request: &'req Request, tail: &'req str) -> Self {
        Self { request, tail }
    }

    pub fn header(&self) -> &'req RequestHeader {
        self.request.header()
    }

    /// The path after the matched prefix, verbatim; empty for exact routes.
    pub fn tail(&self) -> &'req str {
        self.tail
    }

    pub fn body(&self) -> &'req Bytes {
        self.request.body()
    }
}
