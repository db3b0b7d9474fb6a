/// Whether a response has committed its headers, and how many body bytes
/// went out since.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WriteState {
    /// Status and headers are still pending
    #[default]
    Uncommitted,
    /// Headers are committed, carrying the number of body bytes written so far
    Committed(u64),
}

impl WriteState {
    #[inline]
    pub fn is_committed(&self) -> bool {
        matches!(self, WriteState::Committed(_))
    }

    /// Returns the body byte count, or `None` while uncommitted
    #[inline]
    pub fn bytes_written(&self) -> Option<u64> {
        match self {
            WriteState::Uncommitted => None,
            WriteState::Committed(n) => Some(*n),
        }
    }

    /// Moves to `Committed(0)` if uncommitted, returns true when this call did the move
    #[inline]
    pub(crate) fn commit(&mut self) -> bool {
        match self {
            WriteState::Uncommitted => {
                *self = WriteState::Committed(0);
                true
            }
            WriteState::Committed(_) => false,
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, written: usize) {
        if let WriteState::Committed(n) = self {
            *n += written as u64;
        }
    }
}
