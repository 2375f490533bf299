//! # REST API for Accounts
//!
//! Registration, login and logout. Only logout needs a bearer token.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::info;
use shared::{LoginRequest, RegisterRequest};

use crate::io::rest::mappers::AccountMapper;
use crate::io::rest::{ApiError, AuthUser};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> impl IntoResponse {
    info!("POST /api/auth/register - email: {}, role: {:?}", request.email, request.role);

    let command = AccountMapper::to_register_command(request);
    match state.account_service.register(command).await {
        Ok(result) => (StatusCode::CREATED, Json(AccountMapper::to_register_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> impl IntoResponse {
    info!("POST /api/auth/login - email: {}", request.email);

    match state.account_service.login(&request.email, &request.password).await {
        Ok(result) => (StatusCode::OK, Json(AccountMapper::to_login_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn logout(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    info!("POST /api/auth/logout - user: {}", user.uid());

    match state.account_service.logout(user.token()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::{register_and_login, register_body, send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use shared::{LoginResponse, RegisterResponse, UserRole};

    #[tokio::test]
    async fn test_register_then_login() {
        let app = TestApp::new().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(register_body("client@example.com", UserRole::Client)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let registered: RegisterResponse = serde_json::from_value(body).unwrap();
        assert_eq!(registered.success_message, "User registered successfully!");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "client@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let login: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(login.user_id, registered.user_id);
        assert_eq!(login.landing_route, "/homecliente");
        assert!(!login.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_errors() {
        let app = TestApp::new().await;
        register_and_login(&app, "dj@example.com", UserRole::Dj).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(register_body("dj@example.com", UserRole::Dj)),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "The email is already registered.");

        let mut weak = register_body("new@example.com", UserRole::Dj);
        weak["password"] = json!("abc");
        weak["confirm"] = json!("abc");
        let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(weak)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "The password must be at least 6 characters.");
    }

    #[tokio::test]
    async fn test_login_errors() {
        let app = TestApp::new().await;
        register_and_login(&app, "dj@example.com", UserRole::Dj).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "dj@example.com", "password": "wrong!!"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Incorrect password.");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "not-an-email", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "The email is not valid.");
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let app = TestApp::new().await;
        let (_, token) = register_and_login(&app, "dj@example.com", UserRole::Dj).await;

        let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
