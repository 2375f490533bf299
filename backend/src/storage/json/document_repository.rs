//! # JSON Document Repository
//!
//! File-based `DocumentStore`. Every document is a JSON object stored at
//! `{base}/{collection}/{key}.json`.
//!
//! ```text
//! data/
//! ├── accounts.yaml
//! ├── users/{uid}.json
//! ├── calendarios/{uid}.json   ← { "estadosDias": {...} }
//! ├── agendas/{uid}.json       ← { "agendas": {...} }
//! ├── paquetes/{uid}.json
//! └── solicitudes/{generated}.json
//! ```
//!
//! Writes go through a temp file and rename. Writers are serialized so a
//! merge never interleaves with another write to the same store; there is
//! no versioning, the last writer wins.

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::connection::{write_atomically, JsonConnection};
use crate::storage::error::StoreError;
use crate::storage::traits::{Document, DocumentStore, Fields};

/// JSON-file document repository
#[derive(Clone)]
pub struct DocumentRepository {
    connection: JsonConnection,
    write_lock: Arc<Mutex<()>>,
}

impl DocumentRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_document(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let path = self.connection.document_path(collection, key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(fields) => Ok(Some(Document {
                collection: collection.to_string(),
                key: key.to_string(),
                fields,
            })),
            _ => Err(StoreError::Malformed {
                collection: collection.to_string(),
                key: key.to_string(),
                reason: "document is not a JSON object".to_string(),
            }),
        }
    }

    fn write_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<(), StoreError> {
        self.connection.ensure_collection_exists(collection)?;
        let path = self.connection.document_path(collection, key)?;
        let content = serde_json::to_vec_pretty(fields)?;
        write_atomically(&path, &content)?;
        debug!("Wrote document {}/{} to {:?}", collection, key, path);
        Ok(())
    }

    fn read_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let dir = self.connection.collection_directory(collection)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(key) => keys.push(key.to_string()),
                None => warn!("Skipping unreadable file name in {:?}", dir),
            }
        }
        keys.sort();

        let mut documents = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(document) = self.read_document(collection, &key)? {
                documents.push(document);
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        self.read_document(collection, key)
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: Fields,
        merge: bool,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let fields = if merge {
            let mut existing = self
                .read_document(collection, key)?
                .map(|d| d.fields)
                .unwrap_or_default();
            existing.extend(fields);
            existing
        } else {
            fields
        };

        self.write_document(collection, key, &fields)
    }

    async fn query_documents(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let documents = self.read_collection(collection)?;
        Ok(documents
            .into_iter()
            .filter(|d| d.fields.get(field) == Some(value))
            .collect())
    }

    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock().await;
        let key = Uuid::new_v4().simple().to_string();
        self.write_document(collection, &key, &fields)?;
        Ok(key)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.read_collection(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fields must be an object"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_document() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        let document = repo.get_document("calendarios", "nobody").await.unwrap();
        assert!(document.is_none());
    }

    #[tokio::test]
    async fn test_set_and_get_document() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        repo.set_document(
            "calendarios",
            "dj-1",
            fields(json!({"estadosDias": {"2024-1-15": "busy"}})),
            false,
        )
        .await
        .unwrap();

        let document = repo.get_document("calendarios", "dj-1").await.unwrap().unwrap();
        assert_eq!(document.key, "dj-1");
        assert_eq!(document.fields["estadosDias"]["2024-1-15"], json!("busy"));
    }

    #[tokio::test]
    async fn test_set_without_merge_replaces_document() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        repo.set_document("users", "u1", fields(json!({"email": "a@b.c", "rider": "x"})), false)
            .await
            .unwrap();
        repo.set_document("users", "u1", fields(json!({"email": "a@b.c"})), false)
            .await
            .unwrap();

        let document = repo.get_document("users", "u1").await.unwrap().unwrap();
        assert!(document.fields.get("rider").is_none());
    }

    #[tokio::test]
    async fn test_set_with_merge_keeps_other_fields() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        repo.set_document("users", "u1", fields(json!({"email": "a@b.c", "tipo": "dj"})), false)
            .await
            .unwrap();
        repo.set_document("users", "u1", fields(json!({"rider": "CDJ-3000"})), true)
            .await
            .unwrap();

        let document = repo.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(document.fields["email"], json!("a@b.c"));
        assert_eq!(document.fields["rider"], json!("CDJ-3000"));
    }

    #[tokio::test]
    async fn test_query_documents_by_field() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        repo.set_document("users", "u1", fields(json!({"email": "one@x.com"})), false)
            .await
            .unwrap();
        repo.set_document("users", "u2", fields(json!({"email": "two@x.com"})), false)
            .await
            .unwrap();

        let found = repo
            .query_documents("users", "email", &json!("two@x.com"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "u2");

        let none = repo
            .query_documents("users", "email", &json!("three@x.com"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_add_document_generates_key() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        let first = repo.add_document("solicitudes", fields(json!({"djId": "d"}))).await.unwrap();
        let second = repo.add_document("solicitudes", fields(json!({"djId": "d"}))).await.unwrap();
        assert_ne!(first, second);

        let all = repo.list_documents("solicitudes").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_list_missing_collection_is_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());
        assert!(repo.list_documents("paquetes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        let result = repo.set_document("users", "../x", Fields::new(), false).await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_non_object_document_is_malformed() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = DocumentRepository::new(env.connection.clone());

        let dir = env.connection.ensure_collection_exists("users").unwrap();
        fs::write(dir.join("broken.json"), "[1, 2, 3]").unwrap();

        let result = repo.get_document("users", "broken").await;
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }
}
