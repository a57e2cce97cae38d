//! User API: JSON CRUD over a single user collection in a document store.
//!
//! # Environment
//!
//! | Variable | Replaces | Default |
//! |---|---|---|
//! | `STORE_USERNAME` | `MONGO_USERNAME` | required |
//! | `STORE_PASSWORD` | `MONGO_PASSWORD` | required |
//! | `STORE_ENDPOINT` | `MONGO_ENDPOINT` | required, `host[:port][/db]` of the PostgreSQL server |
//! | `STORE_MAX_CONNECTIONS` | | `10` |
//! | `PORT` | | `8080` |
//! | `USER_LIST_DECODE_POLICY` | | `best-effort` (or `fail-fast`) |
//!
//! Deployments moving from a MongoDB-backed setup rename the three `MONGO_*` variables to
//! their `STORE_*` counterparts and point `STORE_ENDPOINT` at PostgreSQL. The old names are
//! not read.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ListDecodePolicy, Settings, StoreSettings, DATABASE_NAME, USERS_COLLECTION};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{InsertOneResult, User, UserFields, UserPayload};
pub use response::{error_envelope, success_created, success_ok, Envelope};
pub use routes::{app_router, common_routes, user_routes};
pub use service::{RequestValidator, UserService};
pub use state::AppState;
pub use store::{Database, DocumentCollection, MemoryCollection, PgCollection};
