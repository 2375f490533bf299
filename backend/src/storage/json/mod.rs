//! File-backed storage: JSON documents plus a YAML account ledger.

pub mod account_repository;
pub mod connection;
pub mod document_repository;

#[cfg(test)]
pub mod test_utils;

pub use account_repository::AccountRepository;
pub use connection::JsonConnection;
pub use document_repository::DocumentRepository;
