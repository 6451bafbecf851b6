//! HTTP request decoder module
//!
//! This module frames requests out of the connection's read buffer. It handles both
//! header parsing and body collection through a small state machine.
//!
//! # Components
//!
//! - [`RequestDecoder`]: Main decoder that coordinates header and payload parsing
//! - Header parsing: Uses [`HeaderDecoder`] for the request line and headers
//! - Payload handling: Uses [`LengthDecoder`] to collect `Content-Length` bytes
//!
//! # Example
//!
//! ```no_run
//! use raw_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET / HTTP/1.1\r\n\r\n");
//! let message = decoder.decode(&mut buffer);
//! ```

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderDecoder;
use crate::ensure;
use crate::protocol::{MalformedRequest, Message, ParseError, RequestHeader};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

/// Default upper bound for a declared `Content-Length`
pub const DEFAULT_MAX_BODY_SIZE: u64 = 16 * 1024 * 1024;

/// A decoder for HTTP requests that handles both headers and payload
///
/// The decoder operates in two phases:
/// 1. Header parsing: Decodes the request headers using [`HeaderDecoder`]
/// 2. Payload collection: Waits until the declared body is fully buffered
///
/// # State Machine
///
/// The decoder maintains its state through the `payload` field:
/// - `None`: Currently parsing headers
/// - `Some(_)`: Header block consumed, collecting the payload
#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    payload: Option<(Result<RequestHeader, MalformedRequest>, LengthDecoder)>,
    max_body_size: u64,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a decoder that rejects bodies declared larger than `max_body_size`
    pub fn with_max_body_size(max_body_size: u64) -> Self {
        Self { max_body_size, ..Default::default() }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { header_decoder: HeaderDecoder::new(), payload: None, max_body_size: DEFAULT_MAX_BODY_SIZE }
    }
}

impl Decoder for RequestDecoder {
    type Item = Message;
    type Error = ParseError;

    /// Attempts to decode one request frame from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Request(_)))`: A complete request with its whole body
    /// - `Ok(Some(Message::Malformed(_)))`: A complete frame that could not be parsed
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: The frame boundary is lost, the stream can't be decoded further
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.payload.is_none() {
            let Some((header, payload_size)) = self.header_decoder.decode(src)? else {
                return Ok(None);
            };

            let length = payload_size.len();
            ensure!(length <= self.max_body_size, ParseError::too_large_body(length, self.max_body_size));
            self.payload = Some((header, LengthDecoder::new(length)));
        }

        let body = match &mut self.payload {
            Some((_, length_decoder)) => match length_decoder.decode(src)? {
                Some(body) => body,
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        let message = match self.payload.take() {
            Some((Ok(header), _)) => Message::Request(header.body(body)),
            Some((Err(malformed), _)) => Message::Malformed(malformed),
            None => return Ok(None),
        };

        Ok(Some(message))
    }

    /// Decodes what is left once the peer has closed its write side.
    ///
    /// An incomplete request at end of stream is a transport-level close, not a
    /// protocol error, so leftover bytes are dropped and the stream simply ends.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(message) => Ok(Some(message)),
            None => {
                if !buf.is_empty() {
                    trace!(remaining = buf.len(), "peer closed inside a request, discard the partial frame");
                    buf.clear();
                }
                self.payload = None;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use indoc::indoc;

    fn raw(str: &str) -> BytesMut {
        BytesMut::from(str.replace('\n', "\r\n").as_str())
    }

    fn expect_request(message: Option<Message>) -> crate::protocol::Request {
        message.and_then(Message::into_request).expect("expect a parsed request")
    }

    #[test]
    fn get_without_body() {
        let mut buf = raw(indoc! {r##"
        GET /echo/abc HTTP/1.1
        Host: localhost:4221

        "##});

        let request = expect_request(RequestDecoder::new().decode(&mut buf).unwrap());
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/echo/abc");
        assert!(request.body().is_empty());
        assert!(buf.is_empty());
    }

    #[test]
    fn post_body_is_exactly_content_length() {
        let mut buf = raw("POST /files/a.txt HTTP/1.1\nContent-Length: 5\n\nhelloGET / HTTP/1.1\n\n");
        let mut decoder = RequestDecoder::new();

        let request = expect_request(decoder.decode(&mut buf).unwrap());
        assert_eq!(&request.body()[..], b"hello");

        let next = expect_request(decoder.decode(&mut buf).unwrap());
        assert_eq!(next.path(), "/");
        assert!(buf.is_empty());
    }

    #[test]
    fn body_spanning_several_reads() {
        let mut decoder = RequestDecoder::new();
        let mut buf = raw("POST /files/b HTTP/1.1\nContent-Length: 10\n\n0123");

        assert!(decoder.decode(&mut buf).unwrap().is_none());
        assert!(buf.starts_with(b"0123"));

        buf.extend_from_slice(b"456");
        assert!(decoder.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"789");
        let request = expect_request(decoder.decode(&mut buf).unwrap());
        assert_eq!(&request.body()[..], b"0123456789");
    }

    #[test]
    fn malformed_request_consumes_its_frame() {
        let mut decoder = RequestDecoder::new();
        let mut buf = raw("GET\nContent-Length: 3\n\nabcGET / HTTP/1.1\n\n");

        let message = decoder.decode(&mut buf).unwrap().unwrap();
        let Message::Malformed(malformed) = message else { panic!("expect a malformed frame") };
        assert!(matches!(malformed.error(), ParseError::InvalidRequestLine { .. }));

        let request = expect_request(decoder.decode(&mut buf).unwrap());
        assert_eq!(request.path(), "/");
    }

    #[test]
    fn too_large_body_is_rejected() {
        let mut buf = raw("POST /files/big HTTP/1.1\nContent-Length: 11\n\n");
        let result = RequestDecoder::with_max_body_size(10).decode(&mut buf);
        assert!(matches!(result, Err(ParseError::TooLargeBody { declared_size: 11, max_size: 10 })));
    }

    #[test]
    fn eof_inside_request_ends_stream() {
        let mut decoder = RequestDecoder::new();
        let mut buf = raw("POST /files/x HTTP/1.1\nContent-Length: 10\n\nabc");

        assert!(decoder.decode_eof(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn eof_after_complete_request_yields_it() {
        let mut decoder = RequestDecoder::new();
        let mut buf = raw("GET / HTTP/1.1\n\n");

        assert!(decoder.decode_eof(&mut buf).unwrap().is_some());
        assert!(decoder.decode_eof(&mut buf).unwrap().is_none());
    }
}
