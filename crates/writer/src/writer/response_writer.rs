use crate::protocol::{WriteError, WriteState};
use crate::sink::{CloseNotify, ResponseSink};
use http::{HeaderMap, StatusCode};
use std::mem;
use tracing::{debug, warn};

/// The status a response carries when nobody sets one
pub const DEFAULT_STATUS: StatusCode = StatusCode::OK;

/// Wraps a [`ResponseSink`] and keeps track of the response it is producing.
///
/// The writer remembers the pending status, whether the head has been
/// committed, and how many body bytes went out, so middleware can ask
/// "has anything been written yet?" before or after the handler runs.
/// Every actual I/O operation is forwarded to the sink.
///
/// ```
/// # use micro_writer::connection::{ConnectionWriter, WriterConfig};
/// # use micro_writer::writer::ResponseWriter;
/// # use http::StatusCode;
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), micro_writer::protocol::WriteError> {
/// let config = WriterConfig { date_header: false, ..WriterConfig::default() };
/// let mut writer = ResponseWriter::new(ConnectionWriter::with_config(Vec::new(), config));
///
/// writer.set_status(StatusCode::ACCEPTED);
/// writer.write(b"hello").await?;
/// writer.write_text(" world").await?;
///
/// assert_eq!(writer.status(), StatusCode::ACCEPTED);
/// assert_eq!(writer.bytes_written(), Some(11));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResponseWriter<W> {
    sink: W,
    status: StatusCode,
    state: WriteState,
}

impl<W: ResponseSink> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, status: DEFAULT_STATUS, state: WriteState::Uncommitted }
    }

    /// Starts over for a new request, returning the previous sink
    pub fn reset(&mut self, sink: W) -> W {
        self.status = DEFAULT_STATUS;
        self.state = WriteState::Uncommitted;
        mem::replace(&mut self.sink, sink)
    }

    /// Records the status to send at commit time.
    ///
    /// Once the head is committed the status is frozen and this is a no-op.
    pub fn set_status(&mut self, status: StatusCode) {
        if status == self.status {
            return;
        }

        if self.state.is_committed() {
            warn!(current = self.status.as_u16(), wanted = status.as_u16(), "headers were already written, status code is not overridden");
            return;
        }

        self.status = status;
    }

    /// Like [`set_status`](Self::set_status) for a raw code, ignoring codes that are not valid statuses
    pub fn set_status_code(&mut self, code: u16) {
        match StatusCode::from_u16(code) {
            Ok(status) => self.set_status(status),
            Err(_) => debug!(code, "ignore invalid status code"),
        }
    }

    /// Sends the status line and headers unless that already happened
    pub fn commit_headers_if_needed(&mut self) -> Result<(), WriteError> {
        if self.state.commit() {
            self.sink.write_header(self.status)?;
        }
        Ok(())
    }

    pub async fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        self.commit_headers_if_needed()?;
        let written = self.sink.write(data).await?;
        self.state.add(written);
        Ok(written)
    }

    pub async fn write_text(&mut self, text: &str) -> Result<usize, WriteError> {
        self.write(text.as_bytes()).await
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn write_state(&self) -> WriteState {
        self.state
    }

    /// Body bytes written so far, `None` until the head is committed
    pub fn bytes_written(&self) -> Option<u64> {
        self.state.bytes_written()
    }

    pub fn has_written(&self) -> bool {
        self.state.is_committed()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.sink.headers()
    }

    /// Headers to send with the head; edits after commit never reach the client
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.sink.headers_mut()
    }

    /// Hands the connection over to the caller.
    ///
    /// The response counts as written afterwards even if the head was never sent.
    pub fn hijack(&mut self) -> Result<W::Upgraded, WriteError> {
        self.state.commit();
        self.sink.hijack()
    }

    pub async fn flush(&mut self) -> Result<(), WriteError> {
        self.commit_headers_if_needed()?;
        self.sink.flush().await
    }

    pub fn close_notify(&mut self) -> Result<CloseNotify, WriteError> {
        self.sink.close_notify()
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Capability;
    use crate::sink::{MockResponseSink, close_channel};
    use mockall::predicate::eq;
    use std::io;

    fn sink_expecting_header(status: StatusCode) -> MockResponseSink {
        let mut sink = MockResponseSink::new();
        sink.expect_write_header().with(eq(status)).times(1).returning(|_| Ok(()));
        sink
    }

    #[test]
    fn test_defaults() {
        let writer = ResponseWriter::new(MockResponseSink::new());

        assert_eq!(writer.status(), StatusCode::OK);
        assert!(!writer.has_written());
        assert_eq!(writer.bytes_written(), None);
        assert_eq!(writer.write_state(), WriteState::Uncommitted);
    }

    #[test]
    fn test_last_status_wins() {
        let mut writer = ResponseWriter::new(sink_expecting_header(StatusCode::NOT_FOUND));

        writer.set_status(StatusCode::CREATED);
        writer.set_status_code(0);
        writer.set_status(StatusCode::NOT_FOUND);
        writer.set_status_code(1000);

        writer.commit_headers_if_needed().unwrap();
        assert_eq!(writer.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_commit_once() {
        let mut writer = ResponseWriter::new(sink_expecting_header(StatusCode::OK));

        writer.commit_headers_if_needed().unwrap();
        writer.commit_headers_if_needed().unwrap();

        assert!(writer.has_written());
        assert_eq!(writer.bytes_written(), Some(0));
    }

    #[tokio::test]
    async fn test_write_accumulates() {
        let mut sink = sink_expecting_header(StatusCode::OK);
        sink.expect_write().times(2).returning(|data| Ok(data.len()));
        let mut writer = ResponseWriter::new(sink);

        assert_eq!(writer.write(b"hello").await.unwrap(), 5);
        assert_eq!(writer.write_text("abc").await.unwrap(), 3);

        assert_eq!(writer.bytes_written(), Some(8));
        assert_eq!(writer.write_state(), WriteState::Committed(8));
    }

    #[tokio::test]
    async fn test_partial_write_is_counted() {
        let mut sink = sink_expecting_header(StatusCode::OK);
        sink.expect_write().times(1).returning(|_| Ok(2));
        let mut writer = ResponseWriter::new(sink);

        assert_eq!(writer.write(b"hello").await.unwrap(), 2);
        assert_eq!(writer.bytes_written(), Some(2));
    }

    #[tokio::test]
    async fn test_status_frozen_after_write() {
        let mut sink = sink_expecting_header(StatusCode::CREATED);
        sink.expect_write().returning(|data| Ok(data.len()));
        let mut writer = ResponseWriter::new(sink);

        writer.set_status(StatusCode::CREATED);
        writer.write(b"x").await.unwrap();
        writer.set_status(StatusCode::INTERNAL_SERVER_ERROR);
        writer.set_status_code(404);

        assert_eq!(writer.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_write_error_propagates() {
        let mut sink = sink_expecting_header(StatusCode::OK);
        sink.expect_write().returning(|_| Err(io::Error::from(io::ErrorKind::BrokenPipe).into()));
        let mut writer = ResponseWriter::new(sink);

        let result = writer.write(b"hello").await;
        assert!(matches!(result, Err(WriteError::Io { ref source }) if source.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(writer.bytes_written(), Some(0));
    }

    #[test]
    fn test_hijack_never_written() {
        let mut sink = MockResponseSink::new();
        sink.expect_write_header().never();
        sink.expect_hijack().times(1).returning(|| Ok(()));
        let mut writer = ResponseWriter::new(sink);

        writer.hijack().unwrap();

        assert!(writer.has_written());
        assert_eq!(writer.bytes_written(), Some(0));
    }

    #[tokio::test]
    async fn test_hijack_keeps_written_bytes() {
        let mut sink = sink_expecting_header(StatusCode::OK);
        sink.expect_write().returning(|data| Ok(data.len()));
        sink.expect_hijack().returning(|| Ok(()));
        let mut writer = ResponseWriter::new(sink);

        writer.write(b"abc").await.unwrap();
        writer.hijack().unwrap();

        assert_eq!(writer.bytes_written(), Some(3));
    }

    #[tokio::test]
    async fn test_flush_commits_first() {
        let mut sink = sink_expecting_header(StatusCode::ACCEPTED);
        sink.expect_flush().times(1).returning(|| Ok(()));
        let mut writer = ResponseWriter::new(sink);

        writer.set_status(StatusCode::ACCEPTED);
        writer.flush().await.unwrap();

        assert!(writer.has_written());
    }

    #[tokio::test]
    async fn test_unsupported_capabilities() {
        let mut sink = sink_expecting_header(StatusCode::OK);
        sink.expect_flush().returning(|| Err(WriteError::unsupported(Capability::Flush)));
        sink.expect_hijack().returning(|| Err(WriteError::unsupported(Capability::Hijack)));
        sink.expect_close_notify().returning(|| Err(WriteError::unsupported(Capability::CloseNotify)));
        let mut writer = ResponseWriter::new(sink);

        let flush_error = writer.flush().await.unwrap_err();
        assert!(flush_error.is_unsupported());
        assert!(matches!(flush_error, WriteError::Unsupported { capability: Capability::Flush }));
        assert!(matches!(writer.hijack(), Err(WriteError::Unsupported { capability: Capability::Hijack })));
        assert!(matches!(writer.close_notify(), Err(WriteError::Unsupported { capability: Capability::CloseNotify })));
    }

    #[tokio::test]
    async fn test_close_notify_delegates() {
        let (notifier, close_notify) = close_channel();
        let mut sink = MockResponseSink::new();
        sink.expect_close_notify().return_once(move || Ok(close_notify));
        let mut writer = ResponseWriter::new(sink);

        let mut close_notify = writer.close_notify().unwrap();
        notifier.notify();
        close_notify.closed().await;
        assert!(!writer.has_written());
    }

    #[tokio::test]
    async fn test_reset() {
        let mut sink = sink_expecting_header(StatusCode::BAD_REQUEST);
        sink.expect_write().returning(|data| Ok(data.len()));
        let mut writer = ResponseWriter::new(sink);

        writer.set_status(StatusCode::BAD_REQUEST);
        writer.write(b"oops").await.unwrap();

        let mut previous = writer.reset(MockResponseSink::new());
        previous.checkpoint();

        assert_eq!(writer.status(), DEFAULT_STATUS);
        assert!(!writer.has_written());
        assert_eq!(writer.bytes_written(), None);
    }

    #[test]
    fn test_headers_delegate() {
        let mut sink = MockResponseSink::new();
        sink.expect_headers_mut().return_var(HeaderMap::new());
        let mut writer = ResponseWriter::new(sink);

        writer.headers_mut().insert(http::header::CONTENT_TYPE, "text/plain".parse().unwrap());
    }
}
