/// Test utilities with automatic cleanup
///
/// `TestEnvironment` owns a temporary directory for the lifetime of a test
/// and removes it on drop, even when the test panics.
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use super::account_repository::AccountRepository;
use super::connection::JsonConnection;
use super::document_repository::DocumentRepository;
use crate::storage::error::StoreError;
use crate::storage::traits::{AccountStore, DocumentStore};

/// RAII test environment backed by a temp directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self, StoreError> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Document store over this environment's directory
    pub fn document_store(&self) -> Arc<dyn DocumentStore> {
        Arc::new(DocumentRepository::new(self.connection.clone()))
    }

    /// Account store over this environment's directory
    pub fn account_store(&self) -> Arc<dyn AccountStore> {
        Arc::new(AccountRepository::new(self.connection.clone()))
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("GIG_CALENDAR_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
