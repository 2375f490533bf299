use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::storage::error::StoreError;

const ACCOUNTS_FILE: &str = "accounts.yaml";

/// JsonConnection manages the data directory and resolves document paths
#[derive(Clone, Debug)]
pub struct JsonConnection {
    base_directory: Arc<PathBuf>,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, StoreError> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one collection's documents
    pub fn collection_directory(&self, collection: &str) -> Result<PathBuf, StoreError> {
        validate_segment(collection)?;
        Ok(self.base_directory.join(collection))
    }

    /// File holding one document
    pub fn document_path(&self, collection: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_segment(key)?;
        Ok(self.collection_directory(collection)?.join(format!("{}.json", key)))
    }

    /// Ensure a collection directory exists and return it
    pub fn ensure_collection_exists(&self, collection: &str) -> Result<PathBuf, StoreError> {
        let dir = self.collection_directory(collection)?;
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// File holding the account ledger
    pub fn accounts_file_path(&self) -> PathBuf {
        self.base_directory.join(ACCOUNTS_FILE)
    }
}

/// Collection names and document keys become path segments
fn validate_segment(segment: &str) -> Result<(), StoreError> {
    let invalid = segment.is_empty()
        || segment.starts_with('.')
        || segment.contains(|c: char| c == '/' || c == '\\')
        || segment.chars().any(char::is_control);
    if invalid {
        return Err(StoreError::InvalidKey(segment.to_string()));
    }
    Ok(())
}

/// Write via a temp file and rename so readers never see a partial file
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("data").join("nested");
        let connection = JsonConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_document_path_layout() {
        let temp = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp.path()).unwrap();
        let path = connection.document_path("calendarios", "uid-1").unwrap();
        assert_eq!(path, temp.path().join("calendarios").join("uid-1.json"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp.path()).unwrap();
        assert!(matches!(
            connection.document_path("users", "../escape"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            connection.document_path("users", ".hidden"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            connection.collection_directory(""),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_write_atomically_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        write_atomically(&path, b"{\"a\":1}").unwrap();
        write_atomically(&path, b"{\"a\":2}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":2}");
        assert!(!path.with_extension("tmp").exists());
    }
}
