use axum::{
    Json,
    extract::{Request, State},
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::Environment;

use super::ErrorReport;

/// Terminal error responder.
///
/// Every error response leaves an [`ErrorReport`] in its extensions. In
/// production the rendered body is sent untouched. In development mode the
/// body is re-rendered with the diagnostic (`details` or `stack`) merged in.
///
/// ```ignore
/// let app = Router::new()
///     .fallback(not_found)
///     .layer(middleware::from_fn_with_state(environment, error_responder));
/// ```
pub async fn error_responder(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };
    if environment.is_production() {
        return response;
    }

    let mut rendered = (response.status(), Json(report.developer_body())).into_response();
    let carried = response
        .headers()
        .iter()
        .filter(|(name, _)| **name != CONTENT_LENGTH && **name != CONTENT_TYPE)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect::<Vec<_>>();
    rendered.headers_mut().extend(carried);
    rendered
}
