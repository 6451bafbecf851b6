//! The handlers this server ships with and the route table wiring them up.

use crate::RequestContext;
use crate::handler::RequestHandler;
use crate::router::{Router, get, post};
use crate::storage::FileStorage;
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use raw_http::protocol::RouteResult;
use std::sync::Arc;
use tracing::warn;

/// Builds the route table, in precedence order.
pub fn router(storage: Arc<dyn FileStorage>) -> Router {
    Router::builder()
        .route("/", get(Root))
        .route("/echo/*", get(Echo))
        .route("/user-agent*", get(UserAgent))
        .route("/files/*", get(ReadFile::new(Arc::clone(&storage))))
        .route("/files/*", post(WriteFile::new(storage)))
        .build()
}

/// `GET /`
#[derive(Debug, Clone, Copy)]
pub struct Root;

#[async_trait]
impl RequestHandler for Root {
    async fn invoke<'req>(&self, _req: &RequestContext<'req>) -> RouteResult {
        RouteResult::ok()
    }
}

/// `GET /echo/<value>`: answers with `<value>` as it appeared on the wire.
#[derive(Debug, Clone, Copy)]
pub struct Echo;

#[async_trait]
impl RequestHandler for Echo {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> RouteResult {
        RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, Bytes::copy_from_slice(req.tail().as_bytes()))
    }
}

/// `GET /user-agent`: answers with the raw `User-Agent` header value, empty when absent.
#[derive(Debug, Clone, Copy)]
pub struct UserAgent;

#[async_trait]
impl RequestHandler for UserAgent {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> RouteResult {
        let user_agent = req
            .header()
            .user_agent()
            .map(|value| Bytes::copy_from_slice(value.as_bytes()))
            .unwrap_or_default();
        RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, user_agent)
    }
}

/// `GET /files/<name>`
pub struct ReadFile {
    storage: Arc<dyn FileStorage>,
}

impl ReadFile {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestHandler for ReadFile {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> RouteResult {
        match self.storage.read(req.tail()).await {
            Ok(contents) => RouteResult::with_body(StatusCode::OK, mime::APPLICATION_OCTET_STREAM, contents),
            Err(e) => {
                warn!(name = req.tail(), cause = %e, "can't read file");
                RouteResult::not_found()
            }
        }
    }
}

/// `POST /files/<name>`: stores the request body verbatim.
pub struct WriteFile {
    storage: Arc<dyn FileStorage>,
}

impl WriteFile {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestHandler for WriteFile {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> RouteResult {
        match self.storage.write(req.tail(), req.body().clone()).await {
            Ok(()) => RouteResult::empty(StatusCode::CREATED),
            Err(e) => {
                warn!(name = req.tail(), cause = %e, "can't write file");
                RouteResult::internal_error()
            }
        }
    }
}
