use axum::{http::StatusCode, response::IntoResponse};

pub const GREETING: &str = "Hello, World!";

/// `GET /`. Answers the same plain-text greeting for every request.
pub async fn home() -> impl IntoResponse {
    (StatusCode::OK, GREETING)
}
