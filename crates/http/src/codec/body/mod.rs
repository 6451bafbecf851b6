//! HTTP body handling module for request payloads.
//!
//! Request bodies are framed only by `Content-Length`; chunked transfer encoding is
//! not supported.
//!
//! - [`LengthDecoder`]: collects a fixed-length payload

mod length_decoder;

pub use length_decoder::LengthDecoder;
