//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Requests are
//! translated into domain commands, and domain results and errors are turned
//! back into JSON responses with the matching status codes.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST routes for calendars, accounts, discovery and requests
//! - **Authentication**: resolving `Authorization: Bearer` tokens to a session
//! - **Error Translation**: domain errors to status codes and `ErrorResponse` bodies
//! - **Serialization**: shared DTOs in and out through `serde_json`

pub mod rest;
