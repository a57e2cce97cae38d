//! UserService: bounded store operations for the user collection.

mod users;
mod validation;
pub use users::UserService;
pub use validation::RequestValidator;
