use bytes::{Buf, Bytes};
use http::{HeaderMap, StatusCode, header};
use tracing::warn;

/// Represents an outgoing HTTP message part, either the response head or a piece of body.
///
/// The generic parameter `T` is the header type, while `Data` is the type of the
/// payload data (defaults to `Bytes`).
#[derive(Debug)]
pub enum Message<T, Data: Buf = Bytes> {
    /// Contains the header information of type `T`
    Header(T),
    /// Contains a chunk of payload data or EOF marker
    Payload(PayloadItem<Data>),
}

/// Represents an item in the HTTP message payload stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem<Data: Buf = Bytes> {
    /// A chunk of payload data
    Chunk(Data),
    /// Marks the end of the payload stream
    Eof,
}

/// Represents the size information of an HTTP payload.
///
/// This enum is used to determine how the body is framed on the wire:
/// - Known length: `Content-Length` framing
/// - Chunked: `Transfer-Encoding: chunked` framing
/// - Empty: No payload is allowed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    /// Decides the body framing from the status and the headers set at commit time.
    ///
    /// Informational, `204 No Content` and `304 Not Modified` responses never carry a
    /// body. Otherwise a parsable `Content-Length` wins and everything else is chunked.
    pub fn for_response(status: StatusCode, headers: &HeaderMap) -> Self {
        if status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
            return PayloadSize::Empty;
        }

        let Some(value) = headers.get(header::CONTENT_LENGTH) else {
            return PayloadSize::Chunked;
        };

        match value.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok()) {
            Some(length) => PayloadSize::Length(length),
            None => {
                warn!(content_length = ?value, "invalid content-length header, fallback to chunked");
                PayloadSize::Chunked
            }
        }
    }

    /// Returns true if the payload uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    /// Returns true if the payload is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}

impl<D: Buf> PayloadItem<D> {
    /// Returns true if this item represents the end of the payload stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    /// Returns true if this item contains chunk data
    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }
}
