//! A minimal HTTP/1.1 protocol core framed directly on raw TCP bytes
//!
//! This crate reads bytes off a transport, frames them into requests, hands each
//! request to a [`handler::Handler`] and writes the encoded response back, keeping
//! the connection open for the next request until the peer asks to close.
//! No HTTP library is involved in framing, parsing or encoding; the `http` crate is
//! only used for its method, status and header types.
//!
//! # Features
//!
//! - HTTP/1.1 request line and header parsing with case-insensitive header names
//! - `Content-Length` framed request bodies, collected across as many reads as needed
//! - Keep-alive connections and pipelined requests
//! - `gzip` response compression negotiated from `Accept-Encoding`
//! - `400 Bad Request` recovery for malformed requests
//!
//! # Example
//!
//! ```no_run
//! use http::StatusCode;
//! use raw_http::connection::HttpConnection;
//! use raw_http::handler::make_handler;
//! use raw_http::protocol::{Request, RouteResult};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("0.0.0.0:4221").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler).await {
//!                 error!("service has error, cause {}, connection shutdown", e);
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<RouteResult, Infallible> {
//!     info!("request path {}", request.path());
//!     Ok(RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, "Hello World!"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: The per-connection loop and its state machine
//! - [`protocol`]: Request, route result and error types
//! - [`codec`]: Request framing/parsing and response encoding
//! - [`encoding`]: Response body content encoding
//! - [`handler`]: Request handler trait and utilities
//!
//! # Limitations
//!
//! - HTTP/1.1 only, no chunked transfer encoding
//! - No TLS support
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod encoding;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
