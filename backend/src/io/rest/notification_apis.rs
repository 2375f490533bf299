//! # REST API for Notifications
//!
//! The signed-in DJ's booking details, listed as dashboard notifications.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use log::info;
use shared::NotificationListResponse;

use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:date_key", delete(dismiss_notification))
}

pub async fn list_notifications(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    info!("GET /api/notifications - user: {}", user.uid());

    match state.schedule_service.notifications(user.uid()).await {
        Ok(notifications) => (StatusCode::OK, Json(NotificationListResponse { notifications })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Delete the booking detail behind a notification; the day keeps its state
pub async fn dismiss_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(date_key): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/notifications/{} - user: {}", date_key, user.uid());

    match state.schedule_service.dismiss_notification(user.uid(), &date_key).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
