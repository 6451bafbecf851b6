//! HTTP codec module for encoding and decoding HTTP messages
//!
//! This module turns the raw byte stream of a connection into requests and turns
//! responses back into bytes. Both sides plug into `tokio_util`'s
//! `FramedRead`/`FramedWrite`.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: Frames and decodes incoming HTTP requests
//!   - Header parsing via the `header` module
//!   - Payload collection via the `body` module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: Encodes outgoing HTTP responses
//!   - Header encoding via the `header` module
//!
//! # Example
//!
//! ```no_run
//! use raw_http::codec::{RequestDecoder, ResponseEncoder};
//! use raw_http::protocol::{Response, ResponseOptions, RouteResult};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::from("GET / HTTP/1.1\r\n\r\n");
//! let message = decoder.decode(&mut request_buffer);
//!
//! // Encode outgoing response
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! let response = Response::new(RouteResult::ok(), ResponseOptions::default());
//! encoder.encode(response, &mut response_buffer).unwrap();
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::DEFAULT_MAX_BODY_SIZE;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
