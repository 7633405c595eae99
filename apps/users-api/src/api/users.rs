//! Users API routes
//!
//! This module wires up the users domain to HTTP routes.

use axum::Router;
use domain_users::handlers;

use crate::state::AppState;

/// Create users router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.users.clone())
}
