use super::shutdown::ShutdownCoordinator;
use crate::errors::{error_responder, handle_panic, not_found};
use crate::http::{create_permissive_cors_layer, security_headers};
use axum::{Json, Router, extract::DefaultBodyLimit, middleware, routing::get};
use core_config::{Environment, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Largest accepted request body.
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Assembles the application router.
///
/// - `/api-docs/openapi.json` serving `T::openapi()`
/// - `apis` nested under `/api`
/// - `health_routes` (liveness/readiness) merged at the root
/// - a fallback answering unmatched routes with `Not Found - <uri>`
///
/// Layers, innermost first: panic catcher, error responder (adds
/// diagnostics in development mode), request tracing, security headers,
/// permissive CORS, body size limit.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", handlers::router(service));
/// let router = create_router::<ApiDoc>(api_routes, health_router(), &Environment::from_env());
/// ```
pub fn create_router<T>(apis: Router, health_routes: Router, environment: &Environment) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .route("/api-docs/openapi.json", get(|| async { Json(T::openapi()) }))
        .nest("/api", apis)
        .merge(health_routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            *environment,
            error_responder,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_permissive_cors_layer())
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
}

/// Production server with coordinated shutdown and cleanup.
///
/// On SIGINT/SIGTERM the listener stops accepting, in-flight requests
/// drain, then `cleanup` runs bounded by `shutdown_timeout`. If the server
/// fails instead, cleanup still runs before the error is returned, so the
/// caller can exit non-zero with resources released.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     database::postgres::close(db).await.ok();
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();

    let cleanup_handle = tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = serve(router, server_config, coordinator.clone()).await;

    // Runs cleanup on the error path too; a no-op if a signal already did.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

async fn serve(
    router: Router,
    server_config: &ServerConfig,
    coordinator: ShutdownCoordinator,
) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })
}
