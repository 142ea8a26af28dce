pub mod codec;
pub mod messages;

pub use codec::Codec;
pub use messages::{ClientMessage, ErrorCode, ServerMessage};
