//! Response writer bookkeeping for the micro http stack
//!
//! This crate wraps the response writer of an HTTP server and tracks what
//! happened to the response so far: the pending status code, whether the
//! status line and headers have been committed, and how many body bytes were
//! written. Middleware uses it to ask "has anything been written yet?" before
//! or after a handler runs, while the wrapped writer keeps doing the I/O,
//! including its advanced capabilities (hijacking, flushing, close notification).
//!
//! # Example
//!
//! ```no_run
//! use http::StatusCode;
//! use micro_writer::connection::ConnectionWriter;
//! use micro_writer::writer::ResponseWriter;
//! use tokio::net::TcpListener;
//! use tracing::{error, info};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let (tcp_stream, _remote_addr) = tcp_listener.accept().await.unwrap();
//!
//!     let mut writer = ResponseWriter::new(ConnectionWriter::new(tcp_stream));
//!     writer.set_status(StatusCode::CREATED);
//!     writer.write_text("Hello World!\r\n").await.unwrap();
//!     info!(status = %writer.status(), bytes = ?writer.bytes_written(), "response written");
//!
//!     if let Err(e) = writer.into_inner().finish().await {
//!         error!(cause = %e, "finish response error");
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`writer`]: [`writer::ResponseWriter`], the bookkeeping adapter
//! - [`sink`]: [`sink::ResponseSink`], the capability set the adapter delegates to
//! - [`connection`]: [`connection::ConnectionWriter`], an HTTP/1.1 sink over `AsyncWrite`
//! - [`codec`]: response head and body encoders used by the connection writer
//! - [`protocol`]: shared types and [`protocol::WriteError`]
//! - [`date`]: cached `Date` header values
//!
//! # Limitations
//!
//! - HTTP/1.1 only
//! - One writer per request, it is not meant to be shared between tasks

pub mod codec;
pub mod connection;
pub mod date;
pub mod protocol;
pub mod sink;
pub mod writer;

mod utils;
pub(crate) use utils::ensure;
