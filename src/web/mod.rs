// Web server — Axum-based JSON API for comparing texts.
//
// All /api/* routes serve JSON. Only /api/compare and /api/logout need a
// session; /health, /api/register and /api/login are public.
//
// Auth: stateless HMAC-SHA256 session cookies. No session table anywhere.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::AuthService;
use crate::config::Config;

pub mod auth;
pub mod handlers;

/// Largest request body accepted by /api/compare (two uploaded files).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, auth: AuthService) -> Result<()> {
    config.require_session_secret()?;
    let addr = format!("{}:{}", config.bind, config.port);

    let state = AppState {
        auth: Arc::new(auth),
        config: Arc::new(config),
    };
    let app = build_router(state);

    info!("textsim API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    // Authenticated API routes (require valid session cookie)
    let protected_api = Router::new()
        .route(
            "/api/compare",
            post(handlers::compare::compare).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/logout", post(handlers::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    // Public routes (no auth)
    let public_api = Router::new()
        .route("/health", get(health))
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login));

    Router::new()
        .merge(protected_api)
        .merge(public_api)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn not_found() -> Response {
    api_error(StatusCode::NOT_FOUND, "Not found")
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// The signed-in user's id, inserted into request extensions by
/// `require_auth` middleware.
#[derive(Clone, Debug)]
pub struct AuthUser(pub String);

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::MemoryStore;

    const SECRET: &str = "router-test-secret";

    fn test_router() -> Router {
        let config = Config {
            users_path: PathBuf::from("unused.json"),
            session_secret: SECRET.to_string(),
            bind: "127.0.0.1".to_string(),
            port: 0,
        };
        build_router(AppState {
            auth: Arc::new(AuthService::new(Arc::new(MemoryStore::new()))),
            config: Arc::new(config),
        })
    }

    fn json_post(uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_compare_requires_session() {
        let request = json_post(
            "/api/compare",
            serde_json::json!({ "text1": "a", "text2": "b" }),
            None,
        );
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_then_compare_json() {
        let app = test_router();

        let register = json_post(
            "/api/register",
            serde_json::json!({ "email": "user@example.com", "password": "pw" }),
            None,
        );
        let response = app.clone().oneshot(register).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);

        let compare = json_post(
            "/api/compare",
            serde_json::json!({ "text1": "Cats run.", "text2": "Dogs run." }),
            Some(&cookie),
        );
        let response = app.oneshot(compare).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["stylistic"], 1.0);
        assert_eq!(json["jaccard"], 0.3333);
        assert_eq!(json["tfidf"], 0.3361);
        assert!(json["generated"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_register_conflict() {
        let app = test_router();
        let body = serde_json::json!({ "email": "dup@example.com", "password": "pw" });

        let first = app
            .clone()
            .oneshot(json_post("/api/register", body.clone(), None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(json_post("/api/register", body, None))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = test_router();
        app.clone()
            .oneshot(json_post(
                "/api/register",
                serde_json::json!({ "email": "known@example.com", "password": "right" }),
                None,
            ))
            .await
            .unwrap();

        let wrong_password = app
            .clone()
            .oneshot(json_post(
                "/api/login",
                serde_json::json!({ "email": "known@example.com", "password": "wrong" }),
                None,
            ))
            .await
            .unwrap();
        let unknown_user = app
            .oneshot(json_post(
                "/api/login",
                serde_json::json!({ "email": "nobody@example.com", "password": "right" }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong_password).await, body_json(unknown_user).await);
    }

    #[tokio::test]
    async fn test_compare_multipart_prefers_files() {
        let cookie = format!(
            "{}={}",
            auth::COOKIE_NAME,
            auth::create_token(SECRET, "user@example.com")
        );

        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file1\"; filename=\"a.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             The cat sat on the mat.\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"text1\"\r\n\r\n\
             ignored because a file was uploaded\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"file2\"; filename=\"\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             \r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"text2\"\r\n\r\n\
             The cat sat on the mat.\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/compare")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["jaccard"], 1.0);
        assert_eq!(json["tfidf"], 1.0);
        assert_eq!(json["stylistic"], 1.0);
    }
}
