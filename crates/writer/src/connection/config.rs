/// Default size of the response buffer, one typical socket write
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024;

/// Tunables of a [`ConnectionWriter`](super::ConnectionWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Encoded bytes are held back until the buffer reaches this size or the sink is flushed
    pub buffer_size: usize,
    /// Adds a `Date` header at commit time when the handler did not set one
    pub date_header: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { buffer_size: DEFAULT_BUFFER_SIZE, date_header: true }
    }
}
