//! HTTP header decoder implementation for parsing HTTP request headers
//!
//! This module finds the end of the header block in the read buffer and turns the
//! request line and header lines into a structured [`RequestHeader`].
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header size: 8KB
//! - Only supports HTTP/1.0 and HTTP/1.1
//!
//! # Implementation Details
//!
//! The decoder works in multiple stages:
//!
//! 1. Scan the buffer for the `\r\n\r\n` terminator, remembering how far it already looked
//! 2. Split the header block on `\r\n`; the first line is the request line
//! 3. Parse every header line, collecting `Content-Length` on the way
//! 4. Parse the request line and build the [`RequestHeader`]
//!
//! Content-Length is collected before the request line is judged so a request with a
//! broken request line still has a known frame size. Such problems are handed back
//! inside the decoded item; only errors that lose the frame boundary are returned
//! as decoder errors.

use bytes::{Buf, Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Version, header};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;

use crate::protocol::{MalformedRequest, ParseError, PayloadSize, RequestHeader, wants_close};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

const CRLF: &[u8] = b"\r\n";
const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Decoder for HTTP request headers implementing the [`Decoder`] trait.
///
/// The item carries the parse outcome of the header block together with the
/// [`PayloadSize`] declared by `Content-Length`.
#[derive(Debug, Default)]
pub struct HeaderDecoder {
    /// Number of leading buffer bytes already known not to hold the terminator
    scanned: usize,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for HeaderDecoder {
    type Item = (Result<RequestHeader, MalformedRequest>, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode HTTP headers from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((header, payload_size)))` if a complete header block was consumed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the header block is too large or its framing headers are invalid
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // tolerate empty lines between pipelined requests
        if self.scanned == 0 {
            while src.starts_with(CRLF) {
                src.advance(CRLF.len());
            }
        }

        // the terminator may straddle the previous scan boundary
        let from = self.scanned.saturating_sub(HEAD_TERMINATOR.len() - 1);
        let Some(position) = find(&src[from..], HEAD_TERMINATOR) else {
            ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
            self.scanned = src.len();
            return Ok(None);
        };

        self.scanned = 0;
        let head_len = from + position;
        let frame_len = head_len + HEAD_TERMINATOR.len();
        ensure!(frame_len <= MAX_HEADER_BYTES, ParseError::too_large_header(frame_len, MAX_HEADER_BYTES));

        trace!(header_size = frame_len, "found header terminator");
        let head = src.split_to(frame_len).freeze().slice(..head_len);
        parse_head(&head).map(Some)
    }
}

/// Parses a header block that has had its terminating empty line removed.
fn parse_head(head: &Bytes) -> Result<(Result<RequestHeader, MalformedRequest>, PayloadSize), ParseError> {
    let mut lines = split_lines(head);
    // split always yields at least one item
    let request_line = lines.next().unwrap_or_default();

    let mut headers = HeaderMap::new();
    let mut content_length: Option<u64> = None;
    let mut header_error = None;

    for line in lines {
        ensure!(headers.len() < MAX_HEADER_NUM, ParseError::too_many_headers(MAX_HEADER_NUM));

        let (name, value) = match parse_header_line(head, line) {
            Ok(pair) => pair,
            Err(e) => {
                header_error.get_or_insert(e);
                continue;
            }
        };

        if name == header::CONTENT_LENGTH {
            let length = parse_content_length(&value)?;
            match content_length {
                Some(existing) if existing != length => {
                    return Err(ParseError::invalid_content_length(format!("conflicting values {existing} and {length}")));
                }
                _ => content_length = Some(length),
            }
        }

        headers.append(name, value);
    }

    let payload_size = content_length.map_or(PayloadSize::new_empty(), PayloadSize::new_length);

    let header = match (parse_request_line(request_line), header_error) {
        (Ok((method, path, version)), None) => Ok(RequestHeader::new(method, path, version, headers)),
        (Err(e), _) | (Ok(_), Some(e)) => Err(MalformedRequest::new(e, wants_close(&headers))),
    };

    Ok((header, payload_size))
}

/// Splits `<METHOD> <PATH> <VERSION>` into its three tokens.
fn parse_request_line(line: &[u8]) -> Result<(Method, String, Version), ParseError> {
    let line = std::str::from_utf8(line).map_err(|e| ParseError::invalid_request_line(e))?;

    let mut tokens = line.split(' ');
    let (Some(method), Some(path), Some(version), None) = (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::invalid_request_line(format!("expect 3 tokens in {line:?}")));
    };
    ensure!(
        !method.is_empty() && !path.is_empty() && !version.is_empty(),
        ParseError::invalid_request_line(format!("empty token in {line:?}"))
    );

    let method = Method::from_bytes(method.as_bytes()).map_err(|_| ParseError::InvalidMethod)?;
    ensure!(path.starts_with('/'), ParseError::InvalidUri);

    let version = match version {
        "HTTP/1.1" => Version::HTTP_11,
        "HTTP/1.0" => Version::HTTP_10,
        // Currently HTTP/2 and HTTP/3 not supported
        other => return Err(ParseError::InvalidVersion(other.to_string())),
    };

    Ok((method, path.to_string(), version))
}

/// Splits a header line on its first colon, trimming whitespace around name and value.
///
/// `line` must be a sub slice of `head` so the value can share its storage.
fn parse_header_line(head: &Bytes, line: &[u8]) -> Result<(HeaderName, HeaderValue), ParseError> {
    let colon = line
        .iter()
        .position(|b| *b == b':')
        .ok_or_else(|| ParseError::invalid_header(format!("missing colon in {:?}", String::from_utf8_lossy(line))))?;

    let name = HeaderName::from_bytes(line[..colon].trim_ascii()).map_err(|e| ParseError::invalid_header(e))?;
    let value = HeaderValue::from_maybe_shared(head.slice_ref(line[colon + 1..].trim_ascii()))
        .map_err(|e| ParseError::invalid_header(e))?;

    Ok((name, value))
}

fn parse_content_length(value: &HeaderValue) -> Result<u64, ParseError> {
    let bytes = value.as_bytes();
    ensure!(
        !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit),
        ParseError::invalid_content_length(format!("value {value:?} is not a decimal length"))
    );

    // digits only, so this is valid utf-8
    let str = std::str::from_utf8(bytes).map_err(|e| ParseError::invalid_content_length(e))?;
    str.parse::<u64>().map_err(|e| ParseError::invalid_content_length(format!("value {str} is not u64: {e}")))
}

fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = Some(bytes);
    std::iter::from_fn(move || {
        let current = rest?;
        match find(current, CRLF) {
            Some(index) => {
                rest = Some(&current[index + CRLF.len()..]);
                Some(&current[..index])
            }
            None => rest.take(),
        }
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
