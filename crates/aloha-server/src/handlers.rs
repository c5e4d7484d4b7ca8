//! Application endpoints. Every route here sits behind `track_http`.

use axum::http::StatusCode;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Answers `/` and every path no other route claims.
pub async fn root() -> &'static str {
    "Aloha!!!\r\n"
}

pub async fn version() -> String {
    format!("{VERSION}\r\n")
}

pub async fn bad_request() -> StatusCode {
    StatusCode::BAD_REQUEST
}

pub async fn forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}
