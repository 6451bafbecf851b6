//! HTTP header processing module for encoding and decoding headers
//!
//! - [`HeaderDecoder`]: Decodes HTTP request headers from raw bytes
//!   - Finds the end of the header block
//!   - Parses the request line and header fields
//!   - Enforces header size and count limits
//!
//! - [`HeaderEncoder`]: Encodes HTTP response headers to bytes
//!   - Writes the status line
//!   - Writes only the headers that apply to the response
//!   - Sets `Content-Length` for responses with a body

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
