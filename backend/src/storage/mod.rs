//! # Storage Module
//!
//! The external collaborators of the booking calendar: a document store
//! (collections of keyed JSON-like documents) and an account store
//! (credential registration, login and sessions).
//!
//! ## Key Responsibilities
//!
//! - **Abstraction**: `DocumentStore` and `AccountStore` traits the domain depends on
//! - **Persisted shapes**: collection/field names and record structs in `records`
//! - **File backend**: `json` module persisting documents under a data directory
//!
//! Domain code never touches files directly; swapping the backend means
//! providing other implementations of the two traits.

pub mod error;
pub mod json;
pub mod records;
pub mod traits;

pub use error::{AuthError, AuthFlow, StoreError};
pub use json::{AccountRepository, DocumentRepository, JsonConnection};
pub use traits::{AccountStore, Credential, Document, DocumentStore, Fields};
