pub mod handlers;
pub mod responder;
pub mod responses;

pub use handlers::{handle_panic, not_found};
pub use responder::error_responder;

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing_error::SpanTrace;
use utoipa::ToSchema;

/// JSON error envelope.
///
/// Every error body is built from this struct. Handler and validation
/// failures carry `success: false`; the document export omits it.
/// `details` and `stack` are only filled in development mode by
/// [`error_responder`].
///
/// ```json
/// { "success": false, "error": "Product not found" }
/// { "success": false, "errors": [{ "field": "id", "message": "Invalid product ID" }] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Underlying failure text (development mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Error chain and span trace (development mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    /// `{ success: false, error }`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// `{ success: false, errors: [...] }`
    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: Some(false),
            errors: Some(errors.into_vec()),
            ..Self::default()
        }
    }

    /// `{ error }` with no `success` flag
    pub fn bare(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// One failed field check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field errors in the order the checks ran.
///
/// Checks push into this list independently; the caller decides once, at
/// the end, whether the request is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Diagnostic detail withheld from production responses.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// Driver or renderer message for a failure a handler caught itself
    Details(String),
    /// Error chain plus span trace for failures answered globally
    Stack(String),
}

/// Response extension attached to every error response.
///
/// Holds the body as sent in production and the diagnostic that
/// [`error_responder`] merges back in when running in development mode.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub body: ErrorResponse,
    pub diagnostic: Option<Diagnostic>,
}

impl ErrorReport {
    /// Render `body` with `status` and attach the report.
    pub fn respond(
        status: StatusCode,
        body: ErrorResponse,
        diagnostic: Option<Diagnostic>,
    ) -> Response {
        let mut response = (status, Json(body.clone())).into_response();
        response
            .extensions_mut()
            .insert(ErrorReport { body, diagnostic });
        response
    }

    /// The body with the diagnostic merged in.
    pub fn developer_body(self) -> ErrorResponse {
        let mut body = self.body;
        match self.diagnostic {
            Some(Diagnostic::Details(details)) => body.details = Some(details),
            Some(Diagnostic::Stack(stack)) => body.stack = Some(stack),
            None => {}
        }
        body
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// 400 with the accumulated field errors
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// 404 for a missing resource
    #[error("{0}")]
    NotFound(String),

    /// 404 from the router fallback; carries the original URI
    #[error("Not Found - {0}")]
    RouteNotFound(String),

    /// Request rejected before reaching a handler (unreadable or malformed body)
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// 500 with a generic message; `details` is only shown in development mode
    #[error("{message}: {details}")]
    Internal { message: String, details: String },

    /// A handler panicked
    #[error("Internal Server Error")]
    Panic(String),
}

impl AppError {
    pub fn internal(message: impl Into<String>, details: impl fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            details: details.to_string(),
        }
    }

    fn stack(&self, origin: &str) -> Diagnostic {
        let trace = SpanTrace::capture().to_string();
        let head = format!("{}: {}", origin, self);
        if trace.trim().is_empty() {
            Diagnostic::Stack(head)
        } else {
            Diagnostic::Stack(format!("{}\n{}", head, trace))
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::info!(%errors, "Request validation failed");
                ErrorReport::respond(StatusCode::BAD_REQUEST, ErrorResponse::invalid(errors), None)
            }
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                ErrorReport::respond(StatusCode::NOT_FOUND, ErrorResponse::failure(message), None)
            }
            AppError::RouteNotFound(_) => {
                let stack = self.stack("RouteNotFound");
                tracing::info!("{}", self);
                ErrorReport::respond(
                    StatusCode::NOT_FOUND,
                    ErrorResponse::failure(self.to_string()),
                    Some(stack),
                )
            }
            AppError::Rejected { status, ref message } => {
                let stack = self.stack("Rejected");
                tracing::warn!(%status, "Request rejected: {}", message);
                ErrorReport::respond(status, ErrorResponse::failure(message.clone()), Some(stack))
            }
            AppError::Internal { message, details } => {
                tracing::error!(%details, "{}", message);
                ErrorReport::respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::failure(message),
                    Some(Diagnostic::Details(details)),
                )
            }
            AppError::Panic(ref panic_message) => {
                tracing::error!(panic = %panic_message, "Handler panicked");
                let stack = match self.stack("Panic") {
                    Diagnostic::Stack(stack) => Diagnostic::Stack(format!("{}\n{}", panic_message, stack)),
                    other => other,
                };
                ErrorReport::respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::failure(self.to_string()),
                    Some(stack),
                )
            }
        }
    }
}
