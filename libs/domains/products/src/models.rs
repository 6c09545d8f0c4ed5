use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};

/// Product record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Server-assigned identifier
    pub product_id: i64,
    /// Product name (2-100 characters, trimmed)
    pub product_name: String,
    /// Unit price, always greater than zero
    pub price: f64,
    /// Units on hand, never negative
    pub stock: i32,
}

/// Normalized product fields accepted on create and full update.
///
/// Request bodies reach this type only through
/// [`BodyRules`](axum_helpers::BodyRules), so a value of it always satisfies
/// the product rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewProduct {
    /// Product name (2-100 characters after trimming)
    #[schema(example = "Wireless Mouse", min_length = 2, max_length = 100)]
    pub product_name: String,
    /// Positive number; numeric strings are accepted
    #[schema(example = 24.99)]
    pub price: f64,
    /// Non-negative integer; integer strings are accepted
    #[schema(example = 150, minimum = 0)]
    pub stock: i32,
}

/// Listing sort order, from the `sort` query parameter.
///
/// Unknown values fall back to the default, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
    /// Highest `product_id` first
    #[default]
    #[strum(disabled)]
    Newest,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Substring match on the product name
    pub search: Option<String>,
    /// One of `price_asc`, `price_desc`, `stock_asc`, `stock_desc`
    pub sort: Option<String>,
}

impl ProductFilter {
    /// The search term, when one was given and is not empty
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
            .as_deref()
            .and_then(|sort| SortOrder::from_str(sort).ok())
            .unwrap_or_default()
    }
}

/// `GET /api/products` envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    /// Number of entries in `data`
    pub count: usize,
    pub data: Vec<Product>,
}

impl ProductListResponse {
    pub fn new(data: Vec<Product>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Single product envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub data: Product,
}

impl ProductResponse {
    pub fn new(data: Product) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Confirmation envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
