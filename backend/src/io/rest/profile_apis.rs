//! # REST API for Profiles

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::UpdateDjProfileRequest;

use crate::io::rest::mappers::AccountMapper;
use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(get_my_profile).put(update_my_profile))
}

pub async fn get_my_profile(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    info!("GET /api/profiles/me - user: {}", user.uid());

    match state.profile_service.profile(user.uid()).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Edit stage name, description, genres and rider of a DJ profile
pub async fn update_my_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpdateDjProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profiles/me - user: {}", user.uid());

    let command = AccountMapper::to_update_profile_command(request);
    match state.profile_service.update_dj_profile(user.uid(), command).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
