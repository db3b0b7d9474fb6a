//! The capability set a response writer delegates to.
//!
//! A [`ResponseSink`] is whatever actually puts a response on the wire for one
//! request. Writing the head and body is mandatory; hijacking, flushing and
//! close notification are optional and default to
//! [`WriteError::Unsupported`](crate::protocol::WriteError::Unsupported).

mod close_notify;
mod response_sink;

pub use close_notify::close_channel;
pub use close_notify::CloseNotifier;
pub use close_notify::CloseNotify;
pub use response_sink::ResponseSink;

#[cfg(test)]
pub use response_sink::MockResponseSink;
