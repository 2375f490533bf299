//! # REST API Interface Layer
//!
//! One module per resource, each exposing `router()` for nesting under
//! `/api`. Handlers stay thin: extract, build a command, call the service,
//! map the result.
//!
//! ## Routes
//!
//! - `/auth`: register, login, logout
//! - `/calendars/:owner_id`: month view, day toggles, booking details
//! - `/notifications`: the signed-in DJ's booking details as notifications
//! - `/profiles/me`: the signed-in user's profile
//! - `/djs`: DJ discovery and genre list
//! - `/packages`: the signed-in DJ's packages
//! - `/requests`: contact requests, proposals and the DJ's inbox

pub mod account_apis;
pub mod auth;
pub mod calendar_apis;
pub mod directory_apis;
pub mod error;
pub mod mappers;
pub mod notification_apis;
pub mod package_apis;
pub mod profile_apis;
pub mod request_apis;

#[cfg(test)]
pub mod test_support;

pub use auth::AuthUser;
pub use error::ApiError;
