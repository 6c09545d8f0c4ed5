//! Positive integer identifier extracted from the `{id}` path segment.

use crate::errors::{AppError, FieldErrors};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

pub const INVALID_ID_MESSAGE: &str = "Invalid product ID";

/// Path identifier that must parse as an integer >= 1.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl IdPath {
    /// Parse a raw path segment. An optional sign and leading zeros are
    /// accepted; anything else, or a value below 1, is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().filter(|id| *id >= 1).map(IdPath)
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(raw)| raw)
            .unwrap_or_default();

        IdPath::parse(&raw)
            .ok_or_else(|| AppError::Validation(FieldErrors::single("id", INVALID_ID_MESSAGE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_integers() {
        assert_eq!(IdPath::parse("1"), Some(IdPath(1)));
        assert_eq!(IdPath::parse("+42"), Some(IdPath(42)));
        assert_eq!(IdPath::parse("007"), Some(IdPath(7)));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for raw in ["", "0", "-3", "abc", "1.5", "1e3", " 4", "99999999999999999999"] {
            assert_eq!(IdPath::parse(raw), None, "{raw:?} should be rejected");
        }
    }
}
