//! HTTP handlers for the greeting/health endpoints and user CRUD.

pub mod common;
pub mod user;
pub use common::*;
pub use user::*;
