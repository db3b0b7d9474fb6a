use crate::codec::ResponseEncoder;
use crate::connection::{Hijacked, WriterConfig};
use crate::date::DateService;
use crate::ensure;
use crate::protocol::{Capability, Message, PayloadItem, PayloadSize, ResponseHead, WriteError, build_response_head};
use crate::sink::{CloseNotify, ResponseSink};
use async_trait::async_trait;
use bytes::BytesMut;
use http::{HeaderMap, StatusCode, header};
use std::mem;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::{debug, warn};

/// Writes one HTTP/1.1 response to an async stream.
///
/// Encoded bytes accumulate in a buffer of [`WriterConfig::buffer_size`] and go
/// to the stream when it fills up, on [`flush`](ResponseSink::flush), or on
/// [`finish`](ConnectionWriter::finish).
#[derive(Debug)]
pub struct ConnectionWriter<W> {
    io: Option<W>,
    buffer: BytesMut,
    encoder: ResponseEncoder,
    headers: HeaderMap,
    committed: Option<(StatusCode, PayloadSize)>,
    close_notify: Option<CloseNotify>,
    config: WriterConfig,
}

impl<W> ConnectionWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(io: W) -> Self {
        Self::with_config(io, WriterConfig::default())
    }

    pub fn with_config(io: W, config: WriterConfig) -> Self {
        Self {
            io: Some(io),
            buffer: BytesMut::with_capacity(config.buffer_size),
            encoder: ResponseEncoder::new(),
            headers: HeaderMap::new(),
            committed: None,
            close_notify: None,
            config,
        }
    }

    /// Lets handlers observe the client going away
    #[must_use]
    pub fn with_close_notify(mut self, close_notify: CloseNotify) -> Self {
        self.close_notify = Some(close_notify);
        self
    }

    /// The status sent with the head, `None` before commit
    pub fn status(&self) -> Option<StatusCode> {
        self.committed.map(|(status, _)| status)
    }

    pub fn is_hijacked(&self) -> bool {
        self.io.is_none()
    }

    /// Terminates the response body and flushes everything.
    ///
    /// A response that never wrote its head gets an implicit `200 OK`. The stream
    /// is returned so the connection can serve its next request.
    pub async fn finish(mut self) -> Result<W, WriteError> {
        ensure!(self.io.is_some(), WriteError::Hijacked);

        if self.committed.is_none() {
            self.encode_head(StatusCode::OK)?;
        }
        if self.encoder.in_body() {
            self.encoder.encode(Message::<(ResponseHead, PayloadSize), &[u8]>::Payload(PayloadItem::Eof), &mut self.buffer)?;
        }

        self.flush_buffer().await?;
        self.io.take().ok_or(WriteError::Hijacked)
    }

    fn encode_head(&mut self, status: StatusCode) -> Result<(), WriteError> {
        if self.config.date_header && !self.headers.contains_key(header::DATE) {
            DateService::get_global_instance().with_http_date(|date| {
                self.headers.insert(header::DATE, date);
            });
        }

        let payload_size = PayloadSize::for_response(status, &self.headers);
        let head = build_response_head(status, self.headers.clone());
        self.encoder.encode(Message::<_, &[u8]>::Header((head, payload_size)), &mut self.buffer)?;

        debug!(status = status.as_u16(), ?payload_size, "response head encoded");
        self.committed = Some((status, payload_size));
        Ok(())
    }

    async fn write_buffer(&mut self) -> Result<(), WriteError> {
        let io = self.io.as_mut().ok_or(WriteError::Hijacked)?;
        if !self.buffer.is_empty() {
            io.write_all(&self.buffer).await?;
            self.buffer.clear();
        }
        Ok(())
    }

    async fn flush_buffer(&mut self) -> Result<(), WriteError> {
        self.write_buffer().await?;
        let io = self.io.as_mut().ok_or(WriteError::Hijacked)?;
        Ok(io.flush().await?)
    }
}

#[async_trait]
impl<W> ResponseSink for ConnectionWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    type Upgraded = Hijacked<W>;

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_header(&mut self, status: StatusCode) -> Result<(), WriteError> {
        ensure!(self.io.is_some(), WriteError::Hijacked);

        if let Some((current, _)) = self.committed {
            warn!(current = current.as_u16(), wanted = status.as_u16(), "response head already written");
            return Ok(());
        }

        self.encode_head(status)
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        ensure!(self.io.is_some(), WriteError::Hijacked);

        if self.committed.is_none() {
            self.encode_head(StatusCode::OK)?;
        }
        let Some((status, payload_size)) = self.committed else {
            return Err(WriteError::encode("response head is missing"));
        };

        if data.is_empty() {
            return Ok(0);
        }
        ensure!(!payload_size.is_empty(), WriteError::body_not_allowed(status));

        self.encoder.encode(Message::<(ResponseHead, PayloadSize), _>::Payload(PayloadItem::Chunk(data)), &mut self.buffer)?;

        if self.buffer.len() >= self.config.buffer_size {
            self.write_buffer().await?;
        }
        Ok(data.len())
    }

    fn hijack(&mut self) -> Result<Self::Upgraded, WriteError> {
        let io = self.io.take().ok_or(WriteError::Hijacked)?;
        let pending = mem::take(&mut self.buffer);
        debug!(pending = pending.len(), "connection hijacked");
        Ok(Hijacked::new(io, pending))
    }

    async fn flush(&mut self) -> Result<(), WriteError> {
        self.flush_buffer().await
    }

    fn close_notify(&mut self) -> Result<CloseNotify, WriteError> {
        self.close_notify.clone().ok_or_else(|| WriteError::unsupported(Capability::CloseNotify))
    }
}
