//! HTTP codec module for encoding responses
//!
//! The [`ResponseEncoder`] turns a stream of [`Message`](crate::protocol::Message)s,
//! one head followed by payload items, into HTTP/1.1 bytes:
//!
//! - the status line and headers via the [`header`] module
//! - the body via the [`body`] module, framed by content-length or chunked encoding
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use http::Response;
//! use micro_writer::codec::ResponseEncoder;
//! use micro_writer::protocol::{Message, PayloadItem, PayloadSize};
//! use tokio_util::codec::Encoder;
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut buffer = BytesMut::new();
//!
//! let head = Response::new(());
//! encoder.encode(Message::<_, Bytes>::Header((head, PayloadSize::Length(2))), &mut buffer).unwrap();
//! encoder.encode(Message::<_, Bytes>::Payload(PayloadItem::Chunk(Bytes::from_static(b"ok"))), &mut buffer).unwrap();
//! assert!(buffer.ends_with(b"\r\n\r\nok"));
//! ```

mod body;
mod header;
mod response_encoder;

pub use response_encoder::ResponseEncoder;
