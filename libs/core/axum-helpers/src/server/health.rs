use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use core_config::AppInfo;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
    pub uptime_secs: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
struct HealthState {
    app: AppInfo,
    started_at: Instant,
}

/// Health check endpoint handler.
///
/// Always returns 200 while the process is serving requests.
async fn health_handler(State(state): State<HealthState>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        name: state.app.name.to_string(),
        version: state.app.version.to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the /health endpoint.
///
/// Uptime is measured from the moment this router is built.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = Router::new().merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState {
            app: app_info,
            started_at: Instant::now(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_app_identity() {
        let app = health_router(AppInfo {
            name: "users_api",
            version: "1.2.3",
        });

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "ok");
        assert_eq!(body.name, "users_api");
        assert_eq!(body.version, "1.2.3");
    }
}
