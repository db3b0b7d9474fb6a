//! HTTP body encoding
//!
//! - [`ChunkedEncoder`]: `Transfer-Encoding: chunked` framing
//! - [`LengthEncoder`]: `Content-Length` framing, refusing to overrun the declared size
//! - [`PayloadEncoder`]: dispatches to one of the above, or swallows nothing for bodiless responses

mod chunked_encoder;
mod length_encoder;
mod payload_encoder;

pub use payload_encoder::PayloadEncoder;
