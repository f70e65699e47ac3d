// Auth middleware — stateless HMAC-SHA256 session cookie validation.
//
// Session token format: {user_b64}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{user_b64}.{timestamp_secs}.{nonce_hex}" signed with
// TEXTSIM_SESSION_SECRET. The user id is base64url-encoded so it can never
// contain the '.' separator. Tokens are valid for SESSION_TTL_SECS (24 hours).
//
// Auth check (this middleware):
//   extract textsim_session cookie → parse → verify HMAC → verify age → allow

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::auth::password::constant_time_eq;

use super::{AppState, AuthUser};

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "textsim_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

/// Build a new session token for `user`, signed with `secret`.
///
/// Returns the raw cookie value (the token string, not the full Set-Cookie header).
pub fn create_token(secret: &str, user: &str) -> String {
    create_token_at(secret, user, now_secs())
}

fn create_token_at(secret: &str, user: &str, timestamp: u64) -> String {
    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let user_b64 = URL_SAFE_NO_PAD.encode(user.as_bytes());
    let payload = format!("{user_b64}.{timestamp}.{nonce}");
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the user id if the HMAC is valid and the
/// token is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    // Format: {user_b64}.{timestamp}.{nonce}.{hmac}
    let parts: Vec<&str> = token.split('.').collect();
    let &[user_b64, timestamp_str, nonce, provided_sig] = parts.as_slice() else {
        return None;
    };

    let payload = format!("{user_b64}.{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    let timestamp = timestamp_str.parse::<u64>().ok()?;
    if now_secs().saturating_sub(timestamp) >= SESSION_TTL_SECS {
        return None;
    }

    let user_bytes = URL_SAFE_NO_PAD.decode(user_b64).ok()?;
    String::from_utf8(user_bytes).ok()
}

/// Axum middleware: reject requests without a valid session cookie with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(user) = session_user(&request, &state.config.session_secret) else {
        return super::api_error(
            axum::http::StatusCode::UNAUTHORIZED,
            "Authentication required",
        );
    };

    // Handlers extract the AuthUser to know who is calling
    request.extensions_mut().insert(AuthUser(user));
    next.run(request).await
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{COOKIE_NAME}={token}; HttpOnly{secure_flag}; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

// --- Private helpers ---

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn hmac_sign(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Extract and validate the session cookie, returning the signed-in user.
fn session_user(request: &Request, session_secret: &str) -> Option<String> {
    let cookie_header = request.headers().get(header::COOKIE)?.to_str().ok()?;

    for pair in cookie_header.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name.trim() == COOKIE_NAME {
                return verify_token(session_secret, value.trim());
            }
        }
    }
    None
}
