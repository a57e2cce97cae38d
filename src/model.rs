//! User entity: stored shape, request payload, and validated fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user. `id` is assigned by the service on create and never changes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub title: String,
}

/// Request body for create and update. Fields are optional here so that a missing
/// field surfaces as a validation error rather than a decode error. Any `id` is ignored.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// The mutable part of a user, after validation. Serializes to the stored document body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub location: String,
    pub title: String,
}

impl UserFields {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            location: self.location,
            title: self.title,
        }
    }
}

/// Acknowledgment returned by create.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub inserted_id: Uuid,
}
