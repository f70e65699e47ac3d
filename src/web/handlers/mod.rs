// Axum request handlers, grouped by concern.

pub mod auth;
pub mod compare;
