//! An HTTP/1.1 file and echo server built on the `raw-http` core.
//!
//! Routes, in precedence order:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | 200, no body |
//! | GET | `/echo/<value>` | 200, `<value>` verbatim |
//! | GET | `/user-agent` | 200, the `User-Agent` header value |
//! | GET | `/files/<name>` | 200 with the file, or 404 |
//! | POST | `/files/<name>` | 201 once the body is stored, or 500 |
//!
//! Anything else is a 404, and any method other than GET or POST a 405.

mod handler;
mod request;

pub mod config;
pub mod router;
pub mod routes;
pub mod server;
pub mod storage;

pub use handler::RequestHandler;
pub use request::RequestContext;
pub use router::Router;
pub use server::Server;
