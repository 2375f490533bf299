//! # REST API for DJ Discovery

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;
use shared::{DjListResponse, GenreListResponse};

use crate::domain::commands::directory::DjFilter;
use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_djs))
        .route("/genres", get(list_genres))
}

#[derive(Deserialize, Debug, Default)]
pub struct DjQuery {
    pub genre: Option<String>,
    pub name: Option<String>,
}

pub async fn list_djs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<DjQuery>,
) -> impl IntoResponse {
    info!("GET /api/djs - query: {:?}", query);

    let filter = DjFilter {
        genre: query.genre,
        name: query.name,
    };
    match state.directory_service.list_djs(&filter).await {
        Ok(djs) => (StatusCode::OK, Json(DjListResponse { djs })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_genres(State(state): State<AppState>, _user: AuthUser) -> impl IntoResponse {
    info!("GET /api/djs/genres");

    match state.directory_service.genres().await {
        Ok(genres) => (StatusCode::OK, Json(GenreListResponse { genres })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
