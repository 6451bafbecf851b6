//! Decoder implementation for HTTP messages with Content-Length header.
//!
//! This module provides functionality to decode HTTP messages where the payload size
//! is specified by the Content-Length header, as defined in
//! [RFC 7230 Section 3.3.2](https://tools.ietf.org/html/rfc7230#section-3.3.2).

use crate::protocol::ParseError;
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

/// A decoder for handling HTTP messages with a known content length.
///
/// Unlike a streaming decoder it yields the payload once, as a single [`Bytes`],
/// when the buffer holds all of it. Until then it reserves room for the missing
/// bytes so the next read can fill them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The total number of payload bytes
    length: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64) -> Self {
        Self { length }
    }
}

impl Decoder for LengthDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// Decodes the payload from the input buffer according to the content length.
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` with exactly `length` bytes once they are all buffered
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let length = usize::try_from(self.length).map_err(|e| ParseError::invalid_content_length(e))?;

        if src.len() < length {
            src.reserve(length - src.len());
            return Ok(None);
        }

        Ok(Some(src.split_to(length).freeze()))
    }
}
