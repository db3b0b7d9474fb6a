use crate::protocol::{Capability, WriteError};
use crate::sink::CloseNotify;
use async_trait::async_trait;
use http::{HeaderMap, StatusCode};

/// The response writer of the underlying server, for one in-flight request.
///
/// Implementations are expected to accept at most one `write_header` call and to
/// write an implicit `200 OK` head if `write` comes first.
#[cfg_attr(test, mockall::automock(type Upgraded = ();))]
#[async_trait]
pub trait ResponseSink: Send {
    /// What a successful [`hijack`](ResponseSink::hijack) hands over, typically the raw connection
    type Upgraded: Send;

    /// Headers that will be sent with the status line
    fn headers(&self) -> &HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sends the status line and the current headers
    fn write_header(&mut self, status: StatusCode) -> Result<(), WriteError>;

    /// Writes body bytes, returning how many were accepted
    async fn write(&mut self, data: &[u8]) -> Result<usize, WriteError>;

    /// Takes the connection away from the response writing path
    fn hijack(&mut self) -> Result<Self::Upgraded, WriteError> {
        Err(WriteError::unsupported(Capability::Hijack))
    }

    /// Pushes buffered bytes down to the client
    async fn flush(&mut self) -> Result<(), WriteError> {
        Err(WriteError::unsupported(Capability::Flush))
    }

    /// Returns a signal resolving once the client connection goes away
    fn close_notify(&mut self) -> Result<CloseNotify, WriteError> {
        Err(WriteError::unsupported(Capability::CloseNotify))
    }
}
