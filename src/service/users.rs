//! User operations against a document collection, each bounded by a per-request deadline.

use crate::config::ListDecodePolicy;
use crate::error::{AppError, StoreError};
use crate::model::{InsertOneResult, User, UserFields};
use crate::store::{Document, DocumentCollection};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    collection: Arc<dyn DocumentCollection>,
    timeout: Duration,
    list_policy: ListDecodePolicy,
}

/// Deadline shared by every store call made for one request.
struct OpContext {
    deadline: Instant,
    timeout: Duration,
}

impl UserService {
    pub fn new(collection: Arc<dyn DocumentCollection>, timeout: Duration, list_policy: ListDecodePolicy) -> Self {
        Self {
            collection,
            timeout,
            list_policy,
        }
    }

    fn context(&self) -> OpContext {
        OpContext {
            deadline: Instant::now() + self.timeout,
            timeout: self.timeout,
        }
    }

    async fn bounded<T, F>(&self, ctx: &OpContext, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let collection = self.collection.name();
        tracing::debug!(collection, op, "store call");
        tokio::time::timeout_at(ctx.deadline, fut).await.map_err(|_| {
            tracing::warn!(collection, op, after = ?ctx.timeout, "store call timed out");
            StoreError::Timeout { op, after: ctx.timeout }
        })?
    }

    /// Insert a new user under a freshly generated id.
    pub async fn create(&self, fields: UserFields) -> Result<InsertOneResult, AppError> {
        let ctx = self.context();
        let doc = Document {
            id: Uuid::new_v4(),
            body: Value::Object(fields_to_map(fields)),
        };
        let inserted_id = self
            .bounded(&ctx, "insert_one", self.collection.insert_one(doc))
            .await?;
        tracing::info!(id = %inserted_id, "user created");
        Ok(InsertOneResult { inserted_id })
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        let ctx = self.context();
        let doc = self
            .bounded(&ctx, "find_one", self.collection.find_one(id))
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(decode(doc)?)
    }

    /// Overwrite name, location and title, then return the stored result.
    pub async fn update(&self, id: Uuid, fields: UserFields) -> Result<User, AppError> {
        let ctx = self.context();
        let result = self
            .bounded(&ctx, "update_one", self.collection.update_one(id, fields_to_map(fields)))
            .await?;
        if result.matched_count == 0 {
            return Err(not_found(id));
        }
        // The document can disappear between the update and this read.
        let doc = self
            .bounded(&ctx, "find_one", self.collection.find_one(id))
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id = %id, "user updated");
        Ok(decode(doc)?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let ctx = self.context();
        let result = self
            .bounded(&ctx, "delete_one", self.collection.delete_one(id))
            .await?;
        if result.deleted_count == 0 {
            return Err(not_found(id));
        }
        tracing::info!(id = %id, "user deleted");
        Ok(())
    }

    /// Every user in store order. Undecodable documents are handled per the list policy.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let ctx = self.context();
        let docs = self
            .bounded(&ctx, "find_all", self.collection.find_all())
            .await?;
        let mut users = Vec::with_capacity(docs.len());
        for doc in docs {
            match decode(doc) {
                Ok(user) => users.push(user),
                Err(e) if self.list_policy == ListDecodePolicy::BestEffort => {
                    tracing::warn!(error = %e, "skipping undecodable user document");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(users)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let ctx = self.context();
        self.bounded(&ctx, "ping", self.collection.ping()).await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("User with ID {} not found", id))
}

fn fields_to_map(fields: UserFields) -> Map<String, Value> {
    let mut set = Map::new();
    set.insert("name".into(), Value::String(fields.name));
    set.insert("location".into(), Value::String(fields.location));
    set.insert("title".into(), Value::String(fields.title));
    set
}

fn decode(doc: Document) -> Result<User, StoreError> {
    let id = doc.id;
    let fields: UserFields = serde_json::from_value(doc.body).map_err(|source| StoreError::Decode {
        id: id.to_string(),
        source,
    })?;
    Ok(fields.into_user(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCollection;
    use serde_json::json;

    fn fields(name: &str, location: &str, title: &str) -> UserFields {
        UserFields {
            name: name.into(),
            location: location.into(),
            title: title.into(),
        }
    }

    fn service(policy: ListDecodePolicy) -> (UserService, Arc<MemoryCollection>) {
        let coll = Arc::new(MemoryCollection::new("users"));
        let svc = UserService::new(coll.clone(), Duration::from_secs(20), policy);
        (svc, coll)
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields() {
        let (svc, _) = service(ListDecodePolicy::BestEffort);
        let ack = svc.create(fields("Ada", "London", "Engineer")).await.unwrap();
        let user = svc.get(ack.inserted_id).await.unwrap();
        assert_eq!(user, fields("Ada", "London", "Engineer").into_user(ack.inserted_id));
    }

    #[tokio::test]
    async fn create_generates_distinct_ids() {
        let (svc, coll) = service(ListDecodePolicy::BestEffort);
        let a = svc.create(fields("Ada", "London", "Engineer")).await.unwrap();
        let b = svc.create(fields("Ada", "London", "Engineer")).await.unwrap();
        assert_ne!(a.inserted_id, b.inserted_id);
        assert_eq!(coll.len(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_user_is_not_found() {
        let (svc, coll) = service(ListDecodePolicy::BestEffort);
        let err = svc.update(Uuid::new_v4(), fields("A", "B", "C")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(coll.is_empty());
    }

    #[tokio::test]
    async fn delete_reports_not_found_on_second_call() {
        let (svc, _) = service(ListDecodePolicy::BestEffort);
        let ack = svc.create(fields("Ada", "London", "Engineer")).await.unwrap();
        svc.delete(ack.inserted_id).await.unwrap();
        assert!(matches!(svc.delete(ack.inserted_id).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.get(ack.inserted_id).await, Err(AppError::NotFound(_))));
    }

    async fn seed_with_broken_document(svc: &UserService, coll: &MemoryCollection) -> Uuid {
        svc.create(fields("Ada", "London", "Engineer")).await.unwrap();
        coll.insert_one(Document {
            id: Uuid::new_v4(),
            body: json!({ "name": "Grace" }),
        })
        .await
        .unwrap();
        svc.create(fields("Linus", "Helsinki", "Maintainer")).await.unwrap().inserted_id
    }

    #[tokio::test]
    async fn best_effort_list_skips_undecodable_documents() {
        let (svc, coll) = service(ListDecodePolicy::BestEffort);
        let last = seed_with_broken_document(&svc, &coll).await;
        let users = svc.list().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Linus"]);
        assert_eq!(users[1].id, last);
    }

    #[tokio::test]
    async fn fail_fast_list_rejects_undecodable_documents() {
        let (svc, coll) = service(ListDecodePolicy::FailFast);
        seed_with_broken_document(&svc, &coll).await;
        let err = svc.list().await.unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::Decode { .. })));
    }

    #[tokio::test]
    async fn empty_collection_lists_nothing() {
        let (svc, _) = service(ListDecodePolicy::FailFast);
        assert!(svc.list().await.unwrap().is_empty());
    }
}
