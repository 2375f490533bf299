//! # Gig Calendar Backend
//!
//! Availability calendars for DJs, with booking details, discovery for
//! clients and promoters, and booking requests between them.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST API, auth extractor, mappers)
//!     ↓
//! Domain Layer (calendar engine, services)
//!     ↓
//! Storage Layer (JSON documents, account ledger)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Build the storage backends and every service from an `AppConfig`
//! - Set up the REST router with CORS limited to the configured origin

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::{
    AccountService, DirectoryService, PackageService, ProfileService, RequestService,
    ScheduleService,
};
use crate::io::rest::{
    account_apis, calendar_apis, directory_apis, notification_apis, package_apis, profile_apis,
    request_apis,
};
use crate::storage::{AccountRepository, AccountStore, DocumentRepository, DocumentStore, JsonConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub schedule_service: ScheduleService,
    pub account_service: AccountService,
    pub profile_service: ProfileService,
    pub directory_service: DirectoryService,
    pub package_service: PackageService,
    pub request_service: RequestService,
}

impl AppState {
    /// Wire every service over one document store and one account store
    pub fn new(documents: Arc<dyn DocumentStore>, accounts: Arc<dyn AccountStore>) -> Self {
        let schedule_service = ScheduleService::new(documents.clone());
        let profile_service = ProfileService::new(documents.clone());
        let account_service = AccountService::new(accounts, profile_service.clone(), schedule_service.clone());
        let directory_service = DirectoryService::new(documents.clone(), profile_service.clone());
        let package_service = PackageService::new(documents.clone());
        let request_service = RequestService::new(documents, profile_service.clone());

        Self {
            schedule_service,
            account_service,
            profile_service,
            directory_service,
            package_service,
            request_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening data directory {:?}", config.data_directory);
    let connection = JsonConnection::new(&config.data_directory)
        .with_context(|| format!("Failed to open data directory {:?}", config.data_directory))?;

    info!("Setting up domain services");
    let documents: Arc<dyn DocumentStore> = Arc::new(DocumentRepository::new(connection.clone()));
    let accounts: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(connection));

    Ok(AppState::new(documents, accounts))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin {:?}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/auth", account_apis::router())
        .nest("/calendars", calendar_apis::router())
        .nest("/notifications", notification_apis::router())
        .nest("/profiles", profile_apis::router())
        .nest("/djs", directory_apis::router())
        .nest("/packages", package_apis::router())
        .nest("/requests", request_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
