//! PostgreSQL-backed collections. The database is a schema; each collection is a table of
//! `(id UUID PRIMARY KEY, doc JSONB)` rows.

use super::{is_plain_identifier, DeleteResult, Document, DocumentCollection, UpdateResult};
use crate::config::StoreSettings;
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Process-wide store connection. Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    name: String,
}

impl Database {
    /// Open the pool, failing if the server cannot be reached within `connect_timeout`.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, StoreError> {
        if !is_plain_identifier(&settings.database) {
            return Err(StoreError::InvalidName(settings.database.clone()));
        }
        let url = settings.connection_string();
        let connect = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(&url);
        let pool = tokio::time::timeout(settings.connect_timeout, connect)
            .await
            .map_err(|_| StoreError::Timeout {
                op: "connect",
                after: settings.connect_timeout,
            })??;
        tracing::info!(endpoint = %settings.endpoint, database = %settings.database, "connected to store");
        Ok(Self::from_pool(pool, settings.database.clone()))
    }

    pub fn from_pool(pool: PgPool, name: String) -> Self {
        Self { pool, name }
    }

    /// Handle for collection `name` in this database. Does no I/O.
    pub fn collection(&self, name: &str) -> Result<PgCollection, StoreError> {
        if !is_plain_identifier(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(PgCollection {
            pool: self.pool.clone(),
            name: name.to_string(),
            table: format!("{}.{}", self.name, name),
        })
    }

    /// Create the schema and the collection table if they do not exist yet.
    pub async fn ensure_collection(&self, name: &str) -> Result<PgCollection, StoreError> {
        let collection = self.collection(name)?;
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.name))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL
            )
            "#,
            collection.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::debug!(collection = %collection.table, "collection ready");
        Ok(collection)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[derive(Clone, Debug)]
pub struct PgCollection {
    pool: PgPool,
    name: String,
    /// Schema-qualified table name, e.g. `user_api.users`.
    table: String,
}

impl PgCollection {
    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl DocumentCollection for PgCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, doc: Document) -> Result<Uuid, StoreError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table);
        tracing::debug!(sql = %sql, id = %doc.id, "insert");
        sqlx::query(&sql)
            .bind(doc.id)
            .bind(&doc.body)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                    StoreError::Duplicate(doc.id)
                } else {
                    StoreError::Db(e)
                }
            })?;
        Ok(doc.id)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id = %id, "find_one");
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, body)| Document { id, body }))
    }

    async fn update_one(&self, id: Uuid, set: Map<String, Value>) -> Result<UpdateResult, StoreError> {
        // `||` replaces matching top-level keys and keeps the rest.
        let sql = format!("UPDATE {} SET doc = doc || $2 WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id = %id, "update_one");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(set))
            .execute(&self.pool)
            .await?;
        Ok(UpdateResult {
            matched_count: result.rows_affected(),
        })
    }

    async fn delete_one(&self, id: Uuid) -> Result<DeleteResult, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id = %id, "delete_one");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(DeleteResult {
            deleted_count: result.rows_affected(),
        })
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let sql = format!("SELECT id, doc FROM {}", self.table);
        tracing::debug!(sql = %sql, "find_all");
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id, body)| Document { id, body }).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy_database() -> Database {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://app:pw@localhost:5432/users")
            .unwrap();
        Database::from_pool(pool, "user_api".into())
    }

    #[tokio::test]
    async fn collection_lookup_is_scoped_to_database() {
        let db = lazy_database();
        let users = db.collection("users").unwrap();
        assert_eq!(users.name(), "users");
        assert_eq!(users.table(), "user_api.users");
        assert_eq!(db.collection("users").unwrap().table(), users.table());
    }

    #[tokio::test]
    async fn collection_lookup_rejects_unsafe_names() {
        let db = lazy_database();
        assert!(matches!(
            db.collection("users;drop"),
            Err(StoreError::InvalidName(ref n)) if n == "users;drop"
        ));
    }
}
