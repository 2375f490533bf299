//! Router-level test helpers: a full app over a temporary data directory.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shared::{LoginResponse, RegisterResponse, UserRole};
use tower::util::ServiceExt;

use crate::storage::json::test_utils::TestEnvironment;
use crate::{create_router, AppState};

pub struct TestApp {
    _env: TestEnvironment,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let env = TestEnvironment::new().await.unwrap();
        let state = AppState::new(env.document_store(), env.account_store());
        let router = create_router(state, "http://localhost:8080").unwrap();
        Self { _env: env, router }
    }
}

/// Send one request; the body is `Value::Null` when the response has none
pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn register_body(email: &str, role: UserRole) -> Value {
    json!({
        "email": email,
        "password": "secret1",
        "confirm": "secret1",
        "role": role,
        "first_name": if role == UserRole::Promoter { Value::Null } else { json!("Lucía") },
        "last_name": "Ramos",
        "national_id": "12345678",
        "district": "Miraflores",
        "province": "Lima",
        "department": "Lima",
        "company": "Eventos SAC",
        "address": "Av. Arequipa 1",
        "tax_id": "20123456789"
    })
}

/// Register an account and sign in; returns the uid and bearer token
pub async fn register_and_login(app: &TestApp, email: &str, role: UserRole) -> (String, String) {
    let (status, body) = send(app, Method::POST, "/api/auth/register", None, Some(register_body(email, role))).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    let registered: RegisterResponse = serde_json::from_value(body).unwrap();

    let credentials = json!({"email": email, "password": "secret1"});
    let (status, body) = send(app, Method::POST, "/api/auth/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    let login: LoginResponse = serde_json::from_value(body).unwrap();
    assert_eq!(login.user_id, registered.user_id);

    (login.user_id, login.token)
}
