//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint
//! - `/grade` → Submission grading

use crate::routes::{grade::grade_routes, health::health_routes};
use crate::state::AppState;
use axum::Router;

pub mod grade;
pub mod health;

/// Builds the application router for all HTTP endpoints and binds it to `app_state`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/grade", grade_routes())
        .with_state(app_state)
}
