//! Document store boundary. A collection holds JSON documents keyed by UUID.
//!
//! [`DocumentCollection`] is the seam the service talks to; [`PgCollection`] keeps documents
//! as JSONB rows in PostgreSQL, [`MemoryCollection`] keeps them in process.

mod memory;
mod postgres;

pub use memory::MemoryCollection;
pub use postgres::{Database, PgCollection};

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

/// One stored document. `body` is always a JSON object and never contains the id.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub body: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

#[async_trait]
pub trait DocumentCollection: Send + Sync {
    fn name(&self) -> &str;

    async fn insert_one(&self, doc: Document) -> Result<Uuid, StoreError>;

    async fn find_one(&self, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Overwrite the top-level keys in `set` on the document with `id`. Keys not in `set` are kept.
    async fn update_one(&self, id: Uuid, set: Map<String, Value>) -> Result<UpdateResult, StoreError>;

    async fn delete_one(&self, id: Uuid) -> Result<DeleteResult, StoreError>;

    /// Every document, in store order.
    async fn find_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Round trip to the backend; used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Whether `s` can be used unquoted as a schema or table name.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers() {
        assert!(is_plain_identifier("users"));
        assert!(is_plain_identifier("user_api"));
        assert!(is_plain_identifier("_v2"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("2users"));
        assert!(!is_plain_identifier("users; drop table x"));
        assert!(!is_plain_identifier("Users"));
        assert!(!is_plain_identifier(&"a".repeat(64)));
    }
}
