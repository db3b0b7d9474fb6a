//! Response state bookkeeping on top of a [`ResponseSink`](crate::sink::ResponseSink).

mod response_writer;

pub use response_writer::ResponseWriter;
pub use response_writer::DEFAULT_STATUS;
