//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Liveness and readiness routes, mounted at the root
pub fn health_routes(state: &AppState) -> Router {
    health_router().merge(health::router(state.clone()))
}
