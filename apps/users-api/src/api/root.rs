//! Service information at `/`

use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub architecture: &'static str,
}

/// Create the root information router
pub fn router() -> Router {
    Router::new().route("/", get(root_info))
}

async fn root_info() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Users API is running",
        timestamp: Utc::now(),
        architecture: "Clean Architecture",
    })
}
