use axum::{extract::OriginalUri, response::{IntoResponse, Response}};
use std::any::Any;

use super::AppError;

/// Router fallback: any unmatched request becomes a 404 naming the URI.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound(uri.to_string())
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Panic(message).into_response()
}
