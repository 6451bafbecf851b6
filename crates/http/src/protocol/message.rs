use crate::protocol::{ParseError, Request};

/// Represents one decoded frame from the request stream.
///
/// The request decoder yields a [`Message`] every time it has consumed a complete
/// frame. A frame whose boundaries were found but whose contents could not be
/// understood is reported as [`Message::Malformed`] rather than as a decoder
/// error, so the connection can answer it and keep reading.
#[derive(Debug)]
pub enum Message {
    /// A fully framed and parsed request
    Request(Request),
    /// A complete frame that failed to parse
    Malformed(MalformedRequest),
}

/// A delimited request frame whose request line or headers could not be parsed.
///
/// The headers that did parse are still consulted for `Connection: close`.
#[derive(Debug)]
pub struct MalformedRequest {
    error: ParseError,
    close: bool,
}

impl MalformedRequest {
    pub fn new(error: ParseError, close: bool) -> Self {
        Self { error, close }
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }

    /// Whether the frame asked for the connection to be closed after the answer.
    pub fn is_close(&self) -> bool {
        self.close
    }
}

/// Represents the size information of an HTTP payload.
///
/// - Known length: the payload section carries exactly that many bytes
/// - Empty: there is no payload section at all
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    #[inline]
    pub fn new_length(length: u64) -> Self {
        PayloadSize::Length(length)
    }

    #[inline]
    pub fn new_empty() -> Self {
        PayloadSize::Empty
    }

    /// Returns true if the payload is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }

    /// Number of payload bytes, zero for [`PayloadSize::Empty`]
    #[inline]
    pub fn len(&self) -> u64 {
        match self {
            PayloadSize::Length(n) => *n,
            PayloadSize::Empty => 0,
        }
    }
}

impl Message {
    /// Converts the message into a Request if it carries one
    pub fn into_request(self) -> Option<Request> {
        match self {
            Message::Request(request) => Some(request),
            Message::Malformed(_) => None,
        }
    }
}
