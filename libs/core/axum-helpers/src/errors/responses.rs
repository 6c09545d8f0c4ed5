//! Reusable OpenAPI response types for the error envelopes.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "success": false, "error": "Failed to fetch products" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - field validation failed",
    content_type = "application/json",
    example = json!({
        "success": false,
        "errors": [
            { "field": "product_name", "message": "Product name must be between 2 and 100 characters" },
            { "field": "price", "message": "Price must be a positive number" }
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid identifier",
    content_type = "application/json",
    example = json!({
        "success": false,
        "errors": [{ "field": "id", "message": "Invalid product ID" }]
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "success": false, "error": "Product not found" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Error without success flag (document export)",
    content_type = "application/json",
    example = json!({ "error": "Product not found" })
)]
pub struct BareErrorResponse(pub ErrorResponse);
