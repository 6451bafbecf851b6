use crate::encoding::Writer;
use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fmt;
use std::io;
use std::io::Write;
use tracing::trace;

/// A content coding this server can apply to a response body.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContentEncoding {
    /// Gzip encoding.
    Gzip,
}

impl ContentEncoding {
    /// Selects an encoding based on the `Accept-Encoding` header value.
    ///
    /// The value is split into comma separated codings. A coding matches when its
    /// name equals ours ignoring case and it is not disabled by `q=0`.
    pub fn negotiate(accept_encodings: &str) -> Option<Self> {
        accept_encodings.split(',').find_map(|item| {
            let mut params = item.split(';');
            let name = params.next()?.trim();
            if !name.eq_ignore_ascii_case(Self::Gzip.name()) {
                return None;
            }

            let rejected = params.filter_map(|param| param.trim().split_once('=')).any(|(key, value)| {
                key.trim().eq_ignore_ascii_case("q") && value.trim().parse::<f32>().is_ok_and(|q| q <= 0.0)
            });

            (!rejected).then_some(Self::Gzip)
        })
    }

    /// Returns the name of the encoding, as written in `Content-Encoding`.
    pub fn name(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    /// Encodes a whole body with this coding.
    pub fn encode(&self, data: &[u8]) -> io::Result<Bytes> {
        let mut encoder = Encoder::new(*self, data.len());
        encoder.write(data)?;
        encoder.finish()
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents an in-progress content encoder.
pub(crate) enum Encoder {
    /// Gzip encoding.
    Gzip(GzEncoder<Writer>),
}

impl Encoder {
    pub(crate) fn new(encoding: ContentEncoding, size_hint: usize) -> Self {
        // gzip adds a fixed 18 byte frame around the deflate stream
        let writer = Writer::with_capacity(size_hint / 2 + 32);
        match encoding {
            ContentEncoding::Gzip => Self::Gzip(GzEncoder::new(writer, Compression::best())),
        }
    }

    /// Writes data to the encoder.
    pub(crate) fn write(&mut self, data: &[u8]) -> Result<(), io::Error> {
        match self {
            Self::Gzip(encoder) => encoder.write_all(data).inspect_err(|err| {
                trace!("Error encoding gzip encoding: {}", err);
            }),
        }
    }

    /// Finishes the encoding process and returns the encoded data.
    pub(crate) fn finish(self) -> Result<Bytes, io::Error> {
        match self {
            Self::Gzip(encoder) => encoder.finish().map(Writer::into_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn negotiate_plain_gzip() {
        assert_eq!(ContentEncoding::negotiate("gzip"), Some(ContentEncoding::Gzip));
        assert_eq!(ContentEncoding::negotiate("GZIP"), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn negotiate_from_list() {
        assert_eq!(ContentEncoding::negotiate("encoding-1, gzip, encoding-2"), Some(ContentEncoding::Gzip));
        assert_eq!(ContentEncoding::negotiate("deflate,gzip;q=0.5"), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn negotiate_rejects_unknown_and_disabled() {
        assert_eq!(ContentEncoding::negotiate("invalid-encoding"), None);
        assert_eq!(ContentEncoding::negotiate("encoding-1, encoding-2"), None);
        assert_eq!(ContentEncoding::negotiate("gzip;q=0"), None);
        assert_eq!(ContentEncoding::negotiate("x-gzip"), None);
        assert_eq!(ContentEncoding::negotiate(""), None);
    }

    #[test]
    fn gzip_round_trips_body() {
        let encoded = ContentEncoding::Gzip.encode(b"abc").unwrap();
        assert_eq!(&encoded[..2], &[0x1f, 0x8b]);
        assert_eq!(gunzip(&encoded), b"abc");
    }

    #[test]
    fn gzip_of_empty_body_is_valid_stream() {
        let encoded = ContentEncoding::Gzip.encode(b"").unwrap();
        assert!(!encoded.is_empty());
        assert!(gunzip(&encoded).is_empty());
    }
}
