//! Shared vocabulary of the response writing path.
//!
//! - [`WriteState`]: whether headers are committed and how many body bytes went out
//! - [`WriteError`] and [`Capability`]: failures surfaced by sinks and the adapter
//! - [`Message`], [`PayloadItem`], [`PayloadSize`]: what the encoders consume
//! - [`ResponseHead`]: the status line and headers handed to the header encoder

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod response;
pub(crate) use response::build_response_head;
pub use response::ResponseHead;

mod state;
pub use state::WriteState;

mod error;
pub use error::Capability;
pub use error::WriteError;
