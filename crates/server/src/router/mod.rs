//! Routing module that maps a request to its handler.
//!
//! The router is an ordered table of `(method, path matcher, handler)` items.
//! Items are evaluated in insertion order and the first one matching both the
//! method and the path wins.
//!
//! When nothing matches, the router answers on its own:
//! - `405 Method Not Allowed` if no item at all accepts the request method
//! - `404 Not Found` otherwise
//!
//! # Example
//!
//! ```no_run
//! use raw_http_server::router::{get, Router};
//! # use raw_http_server::routes::{Echo, Root};
//!
//! let router = Router::builder()
//!     .route("/", get(Root))
//!     .route("/echo/*", get(Echo))
//!     .build();
//! ```

pub mod filter;

use crate::RequestContext;
use crate::handler::RequestHandler;
use filter::{MethodFilter, PathMatcher};
use http::{Method, StatusCode};
use raw_http::protocol::{Request, RouteResult};
use tracing::trace;

/// An immutable, ordered route table.
pub struct Router {
    router_items: Vec<RouterItem>,
}

/// One route: the method and path it accepts and the handler it dispatches to.
pub struct RouterItem {
    method: MethodFilter,
    path: PathMatcher,
    handler: Box<dyn RequestHandler>,
}

/// The outcome of looking up a request in the route table.
pub enum RouteMatch<'router, 'req> {
    /// An item matched; `tail` is the path after the item's prefix
    Found { handler: &'router dyn RequestHandler, tail: &'req str },
    /// Some item accepts the method, none accepts the path
    NotFound,
    /// No item accepts the method
    MethodNotAllowed,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Looks up the first item matching `method` and `path`.
    pub fn at<'router, 'req>(&'router self, method: &Method, path: &'req str) -> RouteMatch<'router, 'req> {
        if !self.router_items.iter().any(|item| item.method.matches(method)) {
            return RouteMatch::MethodNotAllowed;
        }

        self.router_items
            .iter()
            .filter(|item| item.method.matches(method))
            .find_map(|item| item.path.matches(path).map(|tail| RouteMatch::Found { handler: item.handler(), tail }))
            .unwrap_or(RouteMatch::NotFound)
    }

    /// Dispatches a request to its handler, or answers 404/405 when there is none.
    pub async fn route(&self, request: &Request) -> RouteResult {
        match self.at(request.method(), request.path()) {
            RouteMatch::Found { handler, tail } => {
                let context = RequestContext::new(request, tail);
                handler.invoke(&context).await
            }
            RouteMatch::NotFound => {
                trace!(path = request.path(), "no route matched");
                RouteResult::not_found()
            }
            RouteMatch::MethodNotAllowed => {
                trace!(method = %request.method(), "method not allowed");
                RouteResult::empty(StatusCode::METHOD_NOT_ALLOWED)
            }
        }
    }

    pub fn router_items(&self) -> &[RouterItem] {
        &self.router_items
    }
}

impl RouterItem {
    pub fn method(&self) -> &Method {
        self.method.method()
    }

    pub fn path(&self) -> &PathMatcher {
        &self.path
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

pub struct RouterBuilder {
    router_items: Vec<RouterItem>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { router_items: Vec::new() }
    }

    /// Appends a route; earlier routes take precedence over later ones.
    ///
    /// `route` is a literal path, or a literal prefix when it ends with `*`.
    pub fn route(mut self, route: impl Into<PathMatcher>, item_builder: RouterItemBuilder) -> Self {
        self.router_items.push(item_builder.build(route.into()));
        self
    }

    pub fn build(self) -> Router {
        Router { router_items: self.router_items }
    }
}

macro_rules! method_router_filter {
    ($method:ident, $method_const:ident) => {
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            RouterItemBuilder { method: MethodFilter::new(Method::$method_const), handler: Box::new(handler) }
        }
    };
}

method_router_filter!(get, GET);
method_router_filter!(post, POST);

pub struct RouterItemBuilder {
    method: MethodFilter,
    handler: Box<dyn RequestHandler>,
}

impl RouterItemBuilder {
    fn build(self, path: PathMatcher) -> RouterItem {
        RouterItem { method: self.method, path, handler: self.handler }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use http::{HeaderMap, Version};
    use raw_http::protocol::RequestHeader;

    /// Answers with its name and the tail it was given.
    struct Named(&'static str);

    #[async_trait]
    impl RequestHandler for Named {
        async fn invoke<'req>(&self, req: &RequestContext<'req>) -> RouteResult {
            RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, format!("{}:{}", self.0, req.tail()))
        }
    }

    fn router() -> Router {
        Router::builder()
            .route("/", get(Named("root")))
            .route("/echo/*", get(Named("echo")))
            .route("/echo/special", get(Named("shadowed")))
            .route("/files/*", post(Named("write")))
            .build()
    }

    fn request(method: Method, path: &str) -> Request {
        RequestHeader::new(method, path, Version::HTTP_11, HeaderMap::new()).body(Bytes::new())
    }

    async fn body_of(router: &Router, method: Method, path: &str) -> (StatusCode, Option<Bytes>) {
        let result = router.route(&request(method, path)).await;
        (result.status(), result.body().cloned())
    }

    #[test]
    fn items_keep_insertion_order() {
        let router = router();
        let items = router.router_items();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].path(), &PathMatcher::exact("/"));
        assert_eq!(items[3].method(), &Method::POST);
    }

    #[tokio::test]
    async fn first_match_wins() {
        let router = router();
        let (status, body) = body_of(&router, Method::GET, "/echo/special").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap(), "echo:special");
    }

    #[tokio::test]
    async fn method_must_match_too() {
        let router = router();

        assert_eq!(body_of(&router, Method::GET, "/").await.1.unwrap(), "root:");
        assert_eq!(body_of(&router, Method::POST, "/files/a").await.1.unwrap(), "write:a");
        assert_eq!(body_of(&router, Method::GET, "/files/a").await, (StatusCode::NOT_FOUND, None));
        assert_eq!(body_of(&router, Method::POST, "/").await, (StatusCode::NOT_FOUND, None));
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let router = router();
        assert_eq!(body_of(&router, Method::GET, "/nothing").await, (StatusCode::NOT_FOUND, None));
        assert_eq!(body_of(&router, Method::GET, "/echo").await, (StatusCode::NOT_FOUND, None));
    }

    #[tokio::test]
    async fn unknown_method_is_405() {
        let router = router();
        for method in [Method::PUT, Method::DELETE, Method::HEAD] {
            assert_eq!(body_of(&router, method, "/").await, (StatusCode::METHOD_NOT_ALLOWED, None));
        }
    }
}
