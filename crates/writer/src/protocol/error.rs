use http::StatusCode;
use std::fmt;
use std::io;
use thiserror::Error;

/// An optional capability of a [`ResponseSink`](crate::sink::ResponseSink).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Capability {
    Hijack,
    Flush,
    CloseNotify,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Hijack => "hijack",
            Capability::Flush => "flush",
            Capability::CloseNotify => "close notify",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("response sink does not support {capability}")]
    Unsupported { capability: Capability },

    #[error("connection has been hijacked")]
    Hijacked,

    #[error("response status {status} does not allow a body")]
    BodyNotAllowed { status: StatusCode },

    #[error("wrote more than the declared content-length {declared}")]
    ContentLengthExceeded { declared: u64 },

    #[error("response body ended {missing} bytes short of the declared content-length {declared}")]
    ContentLengthShort { declared: u64, missing: u64 },

    #[error("encode response error: {reason}")]
    Encode { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl WriteError {
    pub fn unsupported(capability: Capability) -> Self {
        Self::Unsupported { capability }
    }

    pub fn body_not_allowed(status: StatusCode) -> Self {
        Self::BodyNotAllowed { status }
    }

    pub fn content_length_exceeded(declared: u64) -> Self {
        Self::ContentLengthExceeded { declared }
    }

    pub fn content_length_short(declared: u64, missing: u64) -> Self {
        Self::ContentLengthShort { declared, missing }
    }

    pub fn encode<S: ToString>(str: S) -> Self {
        Self::Encode { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true if the error was caused by a capability the sink lacks
    pub fn is_unsupported(&self) -> bool {
        matches!(self, WriteError::Unsupported { .. })
    }
}
