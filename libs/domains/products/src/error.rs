use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, Diagnostic, ErrorReport, ErrorResponse};
use sea_orm::DbErr;
use std::fmt;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// The product operation a storage failure happened in.
///
/// Picks the generic message the client sees; the driver error itself
/// stays out of production responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch products",
            Operation::Get => "Failed to fetch product",
            Operation::Create => "Failed to create product",
            Operation::Update => "Failed to update product",
            Operation::Delete => "Failed to delete product",
        }
    }

    /// Tag a storage error with this operation, for use with `map_err`.
    pub fn failed(self) -> impl FnOnce(DbErr) -> ProductError {
        move |source| ProductError::Database {
            operation: self,
            source,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Database error during {operation}: {source}")]
    Database {
        operation: Operation,
        #[source]
        source: DbErr,
    },
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for the standard `{ success: false }` envelope
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(PRODUCT_NOT_FOUND.to_string()),
            ProductError::Database { operation, source } => {
                AppError::internal(operation.failure_message(), source)
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Failure of the PDF export endpoint.
///
/// Rendered as `{ "error": ... }` without the `success` flag.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Failed to export product: {0}")]
    Failed(String),
}

impl ExportError {
    pub const FAILURE_MESSAGE: &'static str = "Failed to export product";
}

impl From<ProductError> for ExportError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => ExportError::NotFound(id),
            ProductError::Database { source, .. } => ExportError::Failed(source.to_string()),
        }
    }
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        match self {
            ExportError::NotFound(id) => {
                tracing::info!(product_id = id, "Export requested for missing product");
                ErrorReport::respond(
                    StatusCode::NOT_FOUND,
                    ErrorResponse::bare(PRODUCT_NOT_FOUND),
                    None,
                )
            }
            ExportError::Failed(details) => {
                tracing::error!(%details, "{}", Self::FAILURE_MESSAGE);
                ErrorReport::respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::bare(Self::FAILURE_MESSAGE),
                    Some(Diagnostic::Details(details)),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_database_error_uses_operation_message() {
        let err = Operation::Update.failed()(DbErr::Custom("deadlock detected".to_string()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().cloned().unwrap();
        assert!(matches!(
            report.diagnostic,
            Some(Diagnostic::Details(ref details)) if details.contains("deadlock detected")
        ));
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "error": "Failed to update product" })
        );
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = ProductError::NotFound(9).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "error": "Product not found" })
        );
    }

    #[tokio::test]
    async fn test_export_errors_omit_success_flag() {
        let response = ExportError::NotFound(3).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Product not found" }));

        let response = ExportError::from(Operation::Get.failed()(DbErr::Custom("timeout".into())))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Failed to export product" })
        );
    }

    #[test]
    fn test_every_operation_has_distinct_message() {
        let ops = [
            Operation::List,
            Operation::Get,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
        ];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a.failure_message(), b.failure_message());
            }
        }
    }
}
