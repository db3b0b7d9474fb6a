use bytes::BytesMut;

/// The stream taken over by [`ConnectionWriter::hijack`](super::ConnectionWriter),
/// plus the encoded bytes that were still waiting in its buffer.
///
/// The caller owns the protocol from here on and is expected to send `pending`
/// before anything else.
#[derive(Debug)]
pub struct Hijacked<W> {
    io: W,
    pending: BytesMut,
}

impl<W> Hijacked<W> {
    pub(crate) fn new(io: W, pending: BytesMut) -> Self {
        Self { io, pending }
    }

    pub fn io_mut(&mut self) -> &mut W {
        &mut self.io
    }

    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn into_parts(self) -> (W, BytesMut) {
        (self.io, self.pending)
    }
}
