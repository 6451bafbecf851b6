//! Response body content encoding.
//!
//! Only `gzip` is negotiated. The request's `Accept-Encoding` value is matched
//! token by token, and the whole body is compressed at once since handlers
//! always produce fully buffered bodies.

use bytes::{Bytes, BytesMut};
use std::io;

mod encoder;

pub use encoder::ContentEncoding;

// inspired by from actix-http
pub(crate) struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }

    fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
