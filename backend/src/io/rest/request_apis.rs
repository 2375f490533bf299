//! # REST API for Booking Requests
//!
//! Clients send contact requests, promoters send proposals, DJs read their
//! inbox.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{BookingRequestListResponse, ContactRequest, ProposalRequest};

use crate::io::rest::mappers::RequestMapper;
use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests))
        .route("/contact/:dj_id", post(submit_contact))
        .route("/proposal/:dj_id", post(submit_proposal))
}

/// Requests addressed to the signed-in DJ, newest first
pub async fn list_requests(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    info!("GET /api/requests - user: {}", user.uid());

    match state.request_service.requests_for_dj(user.uid()).await {
        Ok(requests) => (StatusCode::OK, Json(BookingRequestListResponse { requests })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn submit_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Path(dj_id): Path<String>,
    Json(request): Json<ContactRequest>,
) -> impl IntoResponse {
    info!("POST /api/requests/contact/{} - request: {:?}", dj_id, request);

    let command = RequestMapper::to_contact_command(request);
    match state.request_service.submit_contact(user.uid(), &dj_id, command).await {
        Ok(result) => (StatusCode::CREATED, Json(RequestMapper::to_submit_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn submit_proposal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(dj_id): Path<String>,
    Json(request): Json<ProposalRequest>,
) -> impl IntoResponse {
    info!("POST /api/requests/proposal/{} - request: {:?}", dj_id, request);

    let command = RequestMapper::to_proposal_command(request);
    match state.request_service.submit_proposal(user.uid(), &dj_id, command).await {
        Ok(result) => (StatusCode::CREATED, Json(RequestMapper::to_submit_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{register_and_login, send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use shared::{BookingRequestListResponse, RequestKind, SubmitRequestResponse, UserRole};

    #[tokio::test]
    async fn test_contact_and_proposal_reach_the_dj() {
        let app = TestApp::new().await;
        let (dj_id, dj_token) = register_and_login(&app, "dj@example.com", UserRole::Dj).await;
        let (_, client_token) = register_and_login(&app, "client@example.com", UserRole::Client).await;
        let (_, promoter_token) = register_and_login(&app, "promo@example.com", UserRole::Promoter).await;

        let contact = json!({"event_type": "Wedding", "event_date": "2099-02-14", "phone": "999"});
        let uri = format!("/api/requests/contact/{}", dj_id);
        let (status, body) = send(&app, Method::POST, &uri, Some(&client_token), Some(contact)).await;
        assert_eq!(status, StatusCode::CREATED);
        let submitted: SubmitRequestResponse = serde_json::from_value(body).unwrap();
        assert!(!submitted.request_id.is_empty());

        let proposal = json!({
            "event_type": "Festival",
            "event_date": "2099-03-01",
            "venue": "Costa Verde",
            "budget": "$2,500",
            "phone": "988",
            "start_time": null,
            "end_time": null,
            "estimated_guests": "800",
            "details": null
        });
        let uri = format!("/api/requests/proposal/{}", dj_id);
        let (status, _) = send(&app, Method::POST, &uri, Some(&promoter_token), Some(proposal)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::GET, "/api/requests", Some(&dj_token), None).await;
        assert_eq!(status, StatusCode::OK);
        let inbox: BookingRequestListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(inbox.requests.len(), 2);
        let proposal = inbox
            .requests
            .iter()
            .find(|r| r.kind == RequestKind::Promoter)
            .unwrap();
        assert_eq!(proposal.company.as_deref(), Some("Eventos SAC"));
        assert_eq!(proposal.estimated_guests.as_deref(), Some("800"));
        assert_eq!(proposal.details.as_deref(), Some("No additional details"));
    }

    #[tokio::test]
    async fn test_request_validation() {
        let app = TestApp::new().await;
        let (_, client_token) = register_and_login(&app, "client@example.com", UserRole::Client).await;
        let (other_id, _) = register_and_login(&app, "other@example.com", UserRole::Client).await;

        let contact = json!({"event_type": "Wedding", "event_date": "2099-02-14", "phone": "999"});
        let uri = format!("/api/requests/contact/{}", other_id);
        let (status, _) = send(&app, Method::POST, &uri, Some(&client_token), Some(contact)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let empty = json!({"event_type": "", "event_date": "2099-02-14", "phone": "999"});
        let uri = format!("/api/requests/contact/{}", other_id);
        let (status, body) = send(&app, Method::POST, &uri, Some(&client_token), Some(empty)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please fill in all required fields.");
    }
}
