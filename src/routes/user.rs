//! User CRUD routes.

use crate::handlers::{create_user, delete_user, edit_user, get_user, list_users};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/:userId", get(get_user).put(edit_user).delete(delete_user))
        .route("/users", get(list_users))
        .with_state(state)
}
