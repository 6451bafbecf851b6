//! HTTP connection handling module
//!
//! - [`HttpConnection`]: Main connection handler that:
//!   - Owns one accepted transport for its whole lifetime
//!   - Frames, parses and dispatches requests one after another
//!   - Writes each response before reading the next request
//!   - Keeps the connection open unless the request asked for `Connection: close`
//!   - Answers malformed requests with `400 Bad Request`
//!
//! - [`ConnectionState`]: The observable state of the request/response cycle
//! - [`ConnectionOptions`]: Body size limit and optional idle timeout

mod http_connection;

pub use http_connection::ConnectionOptions;
pub use http_connection::ConnectionState;
pub use http_connection::HttpConnection;
