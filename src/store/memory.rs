//! In-process collection. Insertion order is the store order.

use super::{DeleteResult, Document, DocumentCollection, UpdateResult};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryCollection {
    name: String,
    docs: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, doc: Document) -> Result<Uuid, StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        if docs.iter().any(|d| d.id == doc.id) {
            return Err(StoreError::Duplicate(doc.id));
        }
        let id = doc.id;
        docs.push(doc);
        Ok(id)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs.iter().find(|d| d.id == id).cloned())
    }

    async fn update_one(&self, id: Uuid, set: Map<String, Value>) -> Result<UpdateResult, StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        let Some(doc) = docs.iter_mut().find(|d| d.id == id) else {
            return Ok(UpdateResult { matched_count: 0 });
        };
        if !doc.body.is_object() {
            doc.body = Value::Object(Map::new());
        }
        if let Value::Object(body) = &mut doc.body {
            body.extend(set);
        }
        Ok(UpdateResult { matched_count: 1 })
    }

    async fn delete_one(&self, id: Uuid) -> Result<DeleteResult, StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(DeleteResult {
            deleted_count: (before - docs.len()) as u64,
        })
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.docs.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
