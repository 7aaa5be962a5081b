pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn};
use tower_http::cors::CorsLayer;

use crate::middleware::log_request;
use crate::routes::routes;
use crate::state::AppState;

/// Full application: every route under `/api`, request logging and permissive CORS.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive())
}
