//! Core HTTP protocol abstractions.
//!
//! - **Message Handling** ([`message`]): what the request decoder yields
//!   - [`Message`]: a parsed request or a [`MalformedRequest`] frame
//!   - [`PayloadSize`]: payload size information
//!
//! - **Request Processing** ([`request`]): [`RequestHeader`] and the framed [`Request`]
//!
//! - **Response Processing** ([`response`]): [`RouteResult`], [`ResponseOptions`],
//!   the encodable [`Response`] and its [`ResponseHead`]
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors
//!   - [`SendError`]: Response sending errors

mod message;
pub use message::MalformedRequest;
pub use message::Message;
pub use message::PayloadSize;

mod request;
pub use request::Request;
pub use request::RequestHeader;
pub(crate) use request::wants_close;

mod response;
pub use response::Response;
pub use response::ResponseHead;
pub use response::ResponseOptions;
pub use response::RouteResult;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
