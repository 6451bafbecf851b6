//! HTTP header encoder implementation for serializing HTTP response headers
//!
//! This module encodes the status line and the small set of response headers this
//! server emits. A response without a payload section is only its status line and
//! the blank line; no `Content-Length` is written for it.

use crate::protocol::{PayloadSize, ResponseHead, SendError};

use bytes::{BufMut, BytesMut};

use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 256;

/// Encoder for HTTP response headers implementing the [`Encoder`] trait.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    /// Encodes HTTP response headers into the provided bytes buffer.
    ///
    /// # Arguments
    ///
    /// * `item` - Tuple of response head and payload size information
    /// * `dst` - Mutable reference to the destination buffer
    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (head, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        write!(
            FastWrite(dst),
            "HTTP/1.1 {} {}\r\n",
            head.status.as_str(),
            head.status.canonical_reason().unwrap_or_default()
        )?;

        if let Some(content_type) = &head.content_type {
            write!(FastWrite(dst), "Content-Type: {content_type}\r\n")?;
        }

        if let Some(encoding) = head.content_encoding {
            write!(FastWrite(dst), "Content-Encoding: {encoding}\r\n")?;
        }

        if head.close {
            dst.put_slice(b"Connection: close\r\n");
        }

        if let PayloadSize::Length(n) = payload_size {
            write!(FastWrite(dst), "Content-Length: {n}\r\n")?;
        }

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    /// Writes a buffer into this writer, returning how many bytes were written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    /// Flush this output stream, ensuring that all intermediately buffered contents reach their destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
