//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`errors`]**: JSON error envelope, `AppError`, fallback, panic handler
//!   and the environment-aware error responder
//! - **[`extractors`]**: `IdPath` and rule-driven `ValidatedJson`
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{Environment, server::ServerConfig};
//!
//! let environment = Environment::from_env();
//! let router = create_router::<ApiDoc>(Router::new(), health_router(), &environment);
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, create_production_app, create_router, health_router,
    run_health_checks,
};

pub use http::{create_permissive_cors_layer, security_headers};

pub use errors::{AppError, Diagnostic, ErrorReport, ErrorResponse, FieldError, FieldErrors};

pub use extractors::{BodyRules, IdPath, ValidatedJson};
