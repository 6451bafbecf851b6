//! HTTP response encoder module
//!
//! Turns a [`Response`] into the exact bytes written to the peer: the status line,
//! the applicable headers, and the body, gzip compressed when it was negotiated.

use crate::codec::header::HeaderEncoder;
use crate::protocol::{PayloadSize, Response, ResponseHead, SendError};
use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::{error, trace};

#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    /// Encodes one response into `dst`.
    ///
    /// `Content-Length` always matches the bytes written after the header block,
    /// which is the compressed length when `Content-Encoding` is set.
    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (result, options) = item.into_parts();
        let (status, body) = result.into_parts();

        let mut head = ResponseHead::new(status);
        head.close = options.is_close();

        let Some((content_type, body)) = body else {
            return self.header_encoder.encode((head, PayloadSize::new_empty()), dst);
        };

        let body = match options.encoding() {
            Some(encoding) => {
                let encoded = encoding.encode(&body).map_err(|e| {
                    error!(cause = %e, %encoding, "can't encode response body");
                    SendError::invalid_body(format!("encode body with {encoding} error: {e}"))
                })?;
                trace!(%encoding, raw_size = body.len(), encoded_size = encoded.len(), "encoded response body");
                head.content_encoding = Some(encoding);
                encoded
            }
            None => body,
        };

        head.content_type = Some(content_type);
        self.header_encoder.encode((head, PayloadSize::new_length(body.len() as u64)), dst)?;

        dst.reserve(body.len());
        dst.put_slice(&body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ContentEncoding;
    use crate::protocol::{ResponseOptions, RouteResult};
    use flate2::read::GzDecoder;
    use http::StatusCode;
    use std::io::Read;

    fn encode(result: RouteResult, options: ResponseOptions) -> BytesMut {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(Response::new(result, options), &mut dst).unwrap();
        dst
    }

    fn split_head(bytes: &[u8]) -> (String, &[u8]) {
        let position = bytes.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
        (String::from_utf8(bytes[..position].to_vec()).unwrap(), &bytes[position..])
    }

    #[test]
    fn bodiless_response_is_bare_status_line() {
        let bytes = encode(RouteResult::ok(), ResponseOptions::default());
        assert_eq!(&bytes[..], b"HTTP/1.1 200 OK\r\n\r\n");

        let bytes = encode(RouteResult::empty(StatusCode::CREATED), ResponseOptions::default());
        assert_eq!(&bytes[..], b"HTTP/1.1 201 Created\r\n\r\n");
    }

    #[test]
    fn bodiless_response_is_never_compressed() {
        let bytes = encode(RouteResult::not_found(), ResponseOptions::new(Some(ContentEncoding::Gzip), false));
        assert_eq!(&bytes[..], b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn close_is_announced() {
        let bytes = encode(RouteResult::bad_request(), ResponseOptions::closing());
        assert_eq!(&bytes[..], b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\n\r\n");
    }

    #[test]
    fn plain_body() {
        let result = RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, "abc");
        let bytes = encode(result, ResponseOptions::default());
        assert_eq!(&bytes[..], b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc");
    }

    #[test]
    fn gzip_body_reports_compressed_length() {
        let result = RouteResult::with_body(StatusCode::OK, mime::TEXT_PLAIN, "abc");
        let bytes = encode(result, ResponseOptions::new(Some(ContentEncoding::Gzip), true));

        let (head, body) = split_head(&bytes);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Encoding: gzip\r\nConnection: close\r\n"));
        assert!(head.ends_with(&format!("Content-Length: {}\r\n\r\n", body.len())));

        let mut decoded = String::new();
        GzDecoder::new(body).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "abc");
    }
}
