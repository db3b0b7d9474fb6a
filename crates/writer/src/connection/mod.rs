//! HTTP/1.1 response sink over an async byte stream
//!
//! [`ConnectionWriter`] is the [`ResponseSink`](crate::sink::ResponseSink)
//! this crate ships: it encodes the head and body of one response into a
//! buffer and pushes it to any `tokio::io::AsyncWrite`.
//!
//! # Features
//!
//! - Content-length or chunked body framing, chosen at commit time
//! - Bodiless statuses (`1xx`, `204`, `304`) reject body bytes
//! - Optional `Date` header from the shared [`DateService`](crate::date::DateService)
//! - Hijacking hands back the stream together with the bytes not yet sent
//! - Close notification through a [`CloseNotify`](crate::sink::CloseNotify)

mod config;
mod connection_writer;
mod hijacked;

pub use config::WriterConfig;
pub use connection_writer::ConnectionWriter;
pub use hijacked::Hijacked;
