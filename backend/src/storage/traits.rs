//! # Storage Traits
//!
//! The two external collaborators the domain depends on: a document store
//! addressed by collection + key, and an account store handling credentials.
//! Services hold them as `Arc<dyn ...>` so any backend can be plugged in.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{AuthError, StoreError};

/// Top-level fields of a document
pub type Fields = serde_json::Map<String, Value>;

/// A stored document together with its address
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub collection: String,
    pub key: String,
    pub fields: Fields,
}

impl Document {
    /// Decode one top-level field. Absent and null fields read as `None`.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| self.malformed(format!("field '{}': {}", name, e))),
        }
    }

    /// Decode the whole document into a record type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| self.malformed(e.to_string()))
    }

    fn malformed(&self, reason: String) -> StoreError {
        StoreError::Malformed {
            collection: self.collection.clone(),
            key: self.key.clone(),
            reason,
        }
    }
}

/// Serialize a record into document fields; the record must be a JSON object
pub fn to_fields<T: Serialize>(record: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Unavailable(format!(
            "expected an object to store, got {}",
            other
        ))),
    }
}

/// Build a single-field document body
pub fn single_field<T: Serialize>(name: &str, value: &T) -> Result<Fields, StoreError> {
    let mut fields = Fields::new();
    fields.insert(name.to_string(), serde_json::to_value(value)?);
    Ok(fields)
}

/// Remote document database abstraction
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document, `None` when absent
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    /// Write a document. With `merge` the given top-level fields replace
    /// their counterparts and other fields are kept; without it the whole
    /// document is replaced.
    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: Fields,
        merge: bool,
    ) -> Result<(), StoreError>;

    /// All documents whose top-level `field` equals `value`
    async fn query_documents(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Store a new document under a generated key and return that key
    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Every document in a collection, ordered by key
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}

/// An authenticated account and its session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub uid: String,
    pub email: String,
    pub token: String,
}

/// Authentication provider abstraction
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create an account and open a session for it
    async fn register(&self, email: &str, password: &str) -> Result<Credential, AuthError>;

    /// Open a session for an existing account
    async fn login(&self, email: &str, password: &str) -> Result<Credential, AuthError>;

    /// Close a session
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Resolve a session token to its credential
    async fn current_session(&self, token: &str) -> Result<Option<Credential>, AuthError>;
}
