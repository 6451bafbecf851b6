use crate::router::Router;
use async_trait::async_trait;
use raw_http::connection::{ConnectionOptions, HttpConnection};
use raw_http::handler::Handler;
use raw_http::protocol::{Request, RouteResult};
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<SocketAddr>,
    connection_options: ConnectionOptions,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None, connection_options: ConnectionOptions::default() }
    }

    pub fn address(mut self, address: impl Into<SocketAddr>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn connection_options(mut self, connection_options: ConnectionOptions) -> Self {
        self.connection_options = connection_options;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server { router, address, connection_options: self.connection_options })
    }
}

/// The immutable state every connection shares: the route table and the
/// connection tunables.
pub struct Server {
    router: Router,
    address: SocketAddr,
    connection_options: ConnectionOptions,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {address}: {source}")]
    Bind { address: SocketAddr, source: io::Error },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub async fn bind(self) -> Result<Listener, ServerError> {
        let tcp_listener =
            TcpListener::bind(self.address).await.map_err(|source| ServerError::Bind { address: self.address, source })?;
        Ok(Listener { tcp_listener, server: Arc::new(self) })
    }

    /// Binds and then serves forever; only a bind failure returns.
    pub async fn start(self) -> Result<(), ServerError> {
        self.bind().await?.serve().await;
        Ok(())
    }
}

#[async_trait]
impl Handler for Server {
    type Error = Infallible;

    async fn call(&self, req: Request) -> Result<RouteResult, Self::Error> {
        Ok(self.router.route(&req).await)
    }
}

/// A bound server, ready to accept connections.
pub struct Listener {
    tcp_listener: TcpListener,
    server: Arc<Server>,
}

impl Listener {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_listener.local_addr()
    }

    /// Accepts connections forever, each one served on its own task.
    pub async fn serve(self) {
        match self.local_addr() {
            Ok(address) => info!(%address, "start listening"),
            Err(e) => warn!(cause = %e, "start listening at unknown address"),
        }

        loop {
            let (tcp_stream, remote_addr) = match self.tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let server = Arc::clone(&self.server);

            tokio::spawn(async move {
                let options = server.connection_options;
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::with_options(reader, writer, options);
                match connection.process(server).await {
                    Ok(()) => {
                        info!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, cause = %e, "service has error, connection shutdown");
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::get;
    use crate::routes::Root;
    use bytes::Bytes;
    use http::{HeaderMap, Method, StatusCode, Version};
    use raw_http::protocol::RequestHeader;

    fn router() -> Router {
        Router::builder().route("/", get(Root)).build()
    }

    #[test]
    fn build_requires_router_and_address() {
        let address: SocketAddr = ([127, 0, 0, 1], 0).into();

        assert!(matches!(Server::builder().address(address).build(), Err(ServerBuildError::MissingRouter)));
        assert!(matches!(Server::builder().router(router()).build(), Err(ServerBuildError::MissingAddress)));

        let server = Server::builder().address(address).router(router()).build().unwrap();
        assert_eq!(server.address(), address);
    }

    #[tokio::test]
    async fn call_delegates_to_router() {
        let server = Server::builder().address(([127, 0, 0, 1], 0)).router(router()).build().unwrap();

        let found = RequestHeader::new(Method::GET, "/", Version::HTTP_11, HeaderMap::new()).body(Bytes::new());
        let missing = RequestHeader::new(Method::GET, "/nope", Version::HTTP_11, HeaderMap::new()).body(Bytes::new());

        assert_eq!(server.call(found).await.unwrap().status(), StatusCode::OK);
        assert_eq!(server.call(missing).await.unwrap().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap();

        let server = Server::builder().address(address).router(router()).build().unwrap();
        assert!(matches!(server.bind().await, Err(ServerError::Bind { .. })));
    }
}
