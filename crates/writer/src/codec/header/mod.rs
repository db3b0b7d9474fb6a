//! HTTP header encoding
//!
//! - [`HeaderEncoder`]: serializes the status line and header fields, and
//!   reconciles `Content-Length` / `Transfer-Encoding` with the chosen body framing

mod header_encoder;

pub use header_encoder::HeaderEncoder;
