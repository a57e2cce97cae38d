//! Request extractors that reject with the standard error envelope.

pub mod payload;
pub mod user_id;

pub use payload::Payload;
pub use user_id::{parse_user_id, UserId};
