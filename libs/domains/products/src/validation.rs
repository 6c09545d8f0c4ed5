//! Field rules for product request bodies.
//!
//! Every rule runs on every request so the client sees all failures at once.
//! Values are coerced the way form-style clients send them: numbers may
//! arrive as strings, and a name may arrive as a number.

use axum_helpers::{BodyRules, FieldErrors};
use serde::Deserialize;
use serde_json::Value;
use validator::{ValidateLength, ValidateRange};

use crate::models::NewProduct;

pub const NAME_REQUIRED: &str = "Product name is required";
pub const NAME_LENGTH: &str = "Product name must be between 2 and 100 characters";
pub const PRICE_INVALID: &str = "Price must be a positive number";
pub const STOCK_INVALID: &str = "Stock must be a non-negative integer";

const NAME_MIN_CHARS: u64 = 2;
const NAME_MAX_CHARS: u64 = 100;

/// Product body as received, before any rule has run.
///
/// Absent fields and JSON `null` both deserialize to [`Value::Null`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductBody {
    pub product_name: Value,
    pub price: Value,
    pub stock: Value,
}

impl BodyRules for NewProduct {
    type Raw = ProductBody;

    fn check(raw: ProductBody) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let product_name = check_name(&raw.product_name, &mut errors);
        let price = check_price(&raw.price, &mut errors);
        let stock = check_stock(&raw.stock, &mut errors);

        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok(NewProduct {
                product_name,
                price,
                stock,
            }),
            _ => Err(errors),
        }
    }
}

/// Scalars render as text; arrays and objects have no text form.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Trimmed name; an empty name fails both the presence and the length rule.
fn check_name(value: &Value, errors: &mut FieldErrors) -> String {
    let name = as_text(value).unwrap_or_default().trim().to_string();

    if name.is_empty() {
        errors.push("product_name", NAME_REQUIRED);
    }
    if !name.validate_length(Some(NAME_MIN_CHARS), Some(NAME_MAX_CHARS), None) {
        errors.push("product_name", NAME_LENGTH);
    }

    name
}

fn check_price(value: &Value, errors: &mut FieldErrors) -> Option<f64> {
    let price = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
    .filter(|price| price.is_finite())
    .filter(|price| price.validate_range(None, None, Some(0.0), None));

    if price.is_none() {
        errors.push("price", PRICE_INVALID);
    }
    price
}

fn check_stock(value: &Value, errors: &mut FieldErrors) -> Option<i32> {
    let stock = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.abs() <= i32::MAX as f64)
                .map(|n| n as i64)
        }),
        Value::String(text) => text.parse::<i64>().ok(),
        _ => None,
    }
    .filter(|stock| stock.validate_range(Some(0), None, None, None))
    .and_then(|stock| i32::try_from(stock).ok());

    if stock.is_none() {
        errors.push("stock", STOCK_INVALID);
    }
    stock
}

/// Plain decimal notation with an optional sign and exponent.
///
/// Rejects the spellings `f64::from_str` accepts beyond that, such as `inf`
/// and `NaN`.
fn parse_decimal(text: &str) -> Option<f64> {
    let plain = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !plain {
        return None;
    }
    text.parse::<f64>().ok()
}
