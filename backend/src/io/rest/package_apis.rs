//! # REST API for DJ Packages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;
use shared::{Package, PackageListResponse};

use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_packages).post(add_package))
        .route("/:index", put(update_package).delete(remove_package))
}

pub async fn list_packages(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    info!("GET /api/packages - user: {}", user.uid());

    match state.package_service.packages(user.uid()).await {
        Ok(packages) => (StatusCode::OK, Json(PackageListResponse { packages })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Append a package; without a body the placeholder package is added
pub async fn add_package(
    State(state): State<AppState>,
    user: AuthUser,
    body: Option<Json<Package>>,
) -> impl IntoResponse {
    info!("POST /api/packages - user: {}", user.uid());

    let package = body.map(|Json(package)| package);
    match state.package_service.add_package(user.uid(), package).await {
        Ok(packages) => (StatusCode::CREATED, Json(PackageListResponse { packages })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_package(
    State(state): State<AppState>,
    user: AuthUser,
    Path(index): Path<usize>,
    Json(package): Json<Package>,
) -> impl IntoResponse {
    info!("PUT /api/packages/{} - user: {}", index, user.uid());

    match state.package_service.update_package(user.uid(), index, package).await {
        Ok(packages) => (StatusCode::OK, Json(PackageListResponse { packages })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn remove_package(
    State(state): State<AppState>,
    user: AuthUser,
    Path(index): Path<usize>,
) -> impl IntoResponse {
    info!("DELETE /api/packages/{} - user: {}", index, user.uid());

    match state.package_service.remove_package(user.uid(), index).await {
        Ok(packages) => (StatusCode::OK, Json(PackageListResponse { packages })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
