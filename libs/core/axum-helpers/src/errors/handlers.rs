use axum::{
    Json,
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::ErrorCode;

/// Fallback handler for unmatched routes.
///
/// Echoes the requested path so clients can spot typos in the URL.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");

    let body = Json(json!({
        "error": ErrorCode::RouteNotFound.as_str(),
        "message": ErrorCode::RouteNotFound.default_message(),
        "path": uri.path(),
    }));

    (StatusCode::NOT_FOUND, body).into_response()
}
