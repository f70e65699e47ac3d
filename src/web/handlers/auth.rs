// Auth handlers — POST /api/register, /api/login and /api/logout.
//
// Register and login both answer with a signed HMAC session cookie on
// success. Login failures use one generic message whether the email or the
// password was wrong.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::auth::{clear_cookie_header, create_token, set_cookie_header};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    email: String,
    password: String,
}

/// POST /api/register — create an account and sign it in.
///
/// On success: 200 with a session cookie. Taken email: 409.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Response {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "Email and password are required");
    }

    match state.auth.register(email, &body.password).await {
        Ok(true) => session_response(&state, email, "Registered"),
        Ok(false) => api_error(StatusCode::CONFLICT, "User already exists"),
        Err(e) => {
            tracing::error!(error = %e, "Credential store error during registration");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Credential store error")
        }
    }
}

/// POST /api/login — authenticate with email and password.
///
/// On success: 200 with a session cookie. On failure: 401.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Response {
    let email = body.email.trim();
    match state.auth.authenticate(email, &body.password).await {
        Ok(true) => session_response(&state, email, "Authenticated"),
        Ok(false) => api_error(StatusCode::UNAUTHORIZED, "Invalid email or password"),
        Err(e) => {
            tracing::error!(error = %e, "Credential store error during login");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Credential store error")
        }
    }
}

/// POST /api/logout — clear the session cookie.
pub async fn logout() -> Response {
    let cookie = clear_cookie_header();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
        .into_response()
}

fn session_response(state: &AppState, email: &str, message: &str) -> Response {
    let token = create_token(&state.config.session_secret, email);
    // TLS terminates at the reverse proxy, so the server can't tell whether
    // the client connection is secure
    let cookie = set_cookie_header(&token, false);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": message, "user": email })),
    )
        .into_response()
}
