use crate::RequestContext;
use async_trait::async_trait;
use raw_http::protocol::RouteResult;

/// One route's behavior.
///
/// Handlers are infallible: every failure they can meet is mapped to a status code
/// before it leaves the handler.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> RouteResult;
}

