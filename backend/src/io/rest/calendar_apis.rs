//! # REST API for Calendars
//!
//! Month views, day toggles and booking details of one owner's calendar. The
//! caller opens the calendar as its owner when their uid matches the path,
//! otherwise as a read-only viewer.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Local;
use log::info;
use serde::Deserialize;
use shared::{MonthCursor, SaveBookingDetailRequest, ToggleDayRequest};

use crate::domain::commands::schedule::ToggleDayCommand;
use crate::domain::models::ScheduleError;
use crate::domain::{CalendarRole, SessionError};
use crate::io::rest::mappers::CalendarMapper;
use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:owner_id/month", get(get_month))
        .route("/:owner_id/days/:date_key/toggle", post(toggle_day))
        .route(
            "/:owner_id/details/:date_key",
            get(get_booking_detail)
                .put(save_booking_detail)
                .delete(remove_booking_detail),
        )
}

/// Zero-based month, matching `MonthCursor`
#[derive(Deserialize, Debug)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

fn role_for(user: &AuthUser, owner_id: &str) -> CalendarRole {
    if user.uid() == owner_id {
        CalendarRole::Owner
    } else {
        CalendarRole::Viewer
    }
}

/// Render one month; the current month when no cursor is given
pub async fn get_month(
    State(state): State<AppState>,
    user: AuthUser,
    Path(owner_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendars/{}/month - query: {:?}", owner_id, query);

    let session = match state.schedule_service.open(&owner_id, role_for(&user, &owner_id)).await {
        Ok(session) => session,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let today = Local::now().date_naive();
    let cursor = match (query.year, query.month) {
        (Some(year), Some(month)) => MonthCursor { year, month },
        _ => state.schedule_service.calendar().current_cursor(today),
    };
    let view = state.schedule_service.month_view(&session, cursor, today);
    (StatusCode::OK, Json(CalendarMapper::to_month_response(view))).into_response()
}

pub async fn toggle_day(
    State(state): State<AppState>,
    user: AuthUser,
    Path((owner_id, date_key)): Path<(String, String)>,
    Json(request): Json<ToggleDayRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendars/{}/days/{}/toggle - state: {}", owner_id, date_key, request.state);

    let mut session = match state.schedule_service.open(&owner_id, role_for(&user, &owner_id)).await {
        Ok(session) => session,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let command = ToggleDayCommand {
        date_key,
        state: request.state,
    };
    match state.schedule_service.toggle_day(&mut session, command).await {
        Ok(result) => (StatusCode::OK, Json(CalendarMapper::to_toggle_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_booking_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path((owner_id, date_key)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/calendars/{}/details/{}", owner_id, date_key);

    let role = role_for(&user, &owner_id);
    if role.is_read_only() {
        return ApiError::from(ScheduleError::Session(SessionError::ReadOnly)).into_response();
    }

    let session = match state.schedule_service.open(&owner_id, role).await {
        Ok(session) => session,
        Err(e) => return ApiError::from(e).into_response(),
    };
    match state.schedule_service.booking_detail(&session, &date_key) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn save_booking_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path((owner_id, date_key)): Path<(String, String)>,
    Json(request): Json<SaveBookingDetailRequest>,
) -> impl IntoResponse {
    info!("PUT /api/calendars/{}/details/{}", owner_id, date_key);

    let mut session = match state.schedule_service.open(&owner_id, role_for(&user, &owner_id)).await {
        Ok(session) => session,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let command = CalendarMapper::to_save_detail_command(date_key, request);
    match state.schedule_service.save_booking_detail(&mut session, command).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn remove_booking_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path((owner_id, date_key)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/calendars/{}/details/{}", owner_id, date_key);

    let mut session = match state.schedule_service.open(&owner_id, role_for(&user, &owner_id)).await {
        Ok(session) => session,
        Err(e) => return ApiError::from(e).into_response(),
    };
    match state.schedule_service.remove_booking_detail(&mut session, &date_key).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{register_and_login, send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use shared::{
        AvailabilityState, BookingDetail, CalendarMonthResponse, DisplayClass, ToggleAction,
        ToggleDayResponse, UserRole,
    };

    #[tokio::test]
    async fn test_month_view_for_owner_and_viewer() {
        let app = TestApp::new().await;
        let (dj_id, dj_token) = register_and_login(&app, "dj@example.com", UserRole::Dj).await;
        let (_, client_token) = register_and_login(&app, "client@example.com", UserRole::Client).await;

        let uri = format!("/api/calendars/{}/month?year=2024&month=1", dj_id);
        let (status, body) = send(&app, Method::GET, &uri, Some(&dj_token), None).await;
        assert_eq!(status, StatusCode::OK);
        let month: CalendarMonthResponse = serde_json::from_value(body).unwrap();
        assert!(!month.read_only);
        assert_eq!(month.month_name, "February");
        assert_eq!(month.weekday_headers.len(), 7);
        // February 2024 starts on a Thursday and has 29 days
        assert_eq!(month.cells.len(), 4 + 29);
        assert_eq!(month.previous.month, 0);
        assert_eq!(month.next.month, 2);

        let (status, body) = send(&app, Method::GET, &uri, Some(&client_token), None).await;
        assert_eq!(status, StatusCode::OK);
        let month: CalendarMonthResponse = serde_json::from_value(body).unwrap();
        assert!(month.read_only);
    }

    #[tokio::test]
    async fn test_requires_token() {
        let app = TestApp::new().await;
        let (status, body) = send(&app, Method::GET, "/api/calendars/x/month", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_toggle_and_booking_detail_flow() {
        let app = TestApp::new().await;
        let (dj_id, token) = register_and_login(&app, "dj@example.com", UserRole::Dj).await;
        let toggle_uri = format!("/api/calendars/{}/days/2099-6-15/toggle", dj_id);

        let (status, body) = send(&app, Method::POST, &toggle_uri, Some(&token), Some(json!({"state": "busy"}))).await;
        assert_eq!(status, StatusCode::OK);
        let toggled: ToggleDayResponse = serde_json::from_value(body).unwrap();
        assert_eq!(toggled.state, AvailabilityState::Busy);
        assert_eq!(toggled.action, ToggleAction::PromptDetail);

        let detail_uri = format!("/api/calendars/{}/details/2099-6-15", dj_id);
        let detail = json!({
            "contact_person": "Ana",
            "contact_phone": "999111222",
            "address": "Av. Larco 123",
            "description": "Wedding"
        });
        let (status, _) = send(&app, Method::PUT, &detail_uri, Some(&token), Some(detail)).await;
        assert_eq!(status, StatusCode::OK);

        // same state again shows the saved detail instead of clearing the day
        let (_, body) = send(&app, Method::POST, &toggle_uri, Some(&token), Some(json!({"state": "busy"}))).await;
        let toggled: ToggleDayResponse = serde_json::from_value(body).unwrap();
        assert_eq!(toggled.action, ToggleAction::ShowDetail);
        assert_eq!(toggled.detail.unwrap().contact_person, "Ana");

        let (status, body) = send(&app, Method::GET, &detail_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let saved: BookingDetail = serde_json::from_value(body).unwrap();
        assert_eq!(saved.address.as_deref(), Some("Av. Larco 123"));

        let month_uri = format!("/api/calendars/{}/month?year=2099&month=5", dj_id);
        let (_, body) = send(&app, Method::GET, &month_uri, Some(&token), None).await;
        let month: CalendarMonthResponse = serde_json::from_value(body).unwrap();
        let cell = month
            .cells
            .iter()
            .find(|c| c.slot.date_key == "2099-6-15")
            .unwrap();
        assert_eq!(cell.class, DisplayClass::Busy);

        let (status, _) = send(&app, Method::DELETE, &detail_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &detail_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_viewer_cannot_edit_or_read_details() {
        let app = TestApp::new().await;
        let (dj_id, _) = register_and_login(&app, "dj@example.com", UserRole::Dj).await;
        let (_, promoter_token) = register_and_login(&app, "promo@example.com", UserRole::Promoter).await;

        let toggle_uri = format!("/api/calendars/{}/days/2099-6-15/toggle", dj_id);
        let (status, _) = send(
            &app,
            Method::POST,
            &toggle_uri,
            Some(&promoter_token),
            Some(json!({"state": "available"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let detail_uri = format!("/api/calendars/{}/details/2099-6-15", dj_id);
        let (status, _) = send(&app, Method::GET, &detail_uri, Some(&promoter_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_date_key_and_unbookable_detail() {
        let app = TestApp::new().await;
        let (dj_id, token) = register_and_login(&app, "dj@example.com", UserRole::Dj).await;

        let bad_uri = format!("/api/calendars/{}/days/2024-13-40/toggle", dj_id);
        let (status, _) = send(&app, Method::POST, &bad_uri, Some(&token), Some(json!({"state": "busy"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let detail_uri = format!("/api/calendars/{}/details/2099-1-1", dj_id);
        let detail = json!({
            "contact_person": "Ana",
            "contact_phone": "999",
            "address": null,
            "description": "Party"
        });
        let (status, _) = send(&app, Method::PUT, &detail_uri, Some(&token), Some(detail)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
