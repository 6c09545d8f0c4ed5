//! JSON body extractor driven by a per-type rule set.

use crate::errors::{AppError, FieldErrors};
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

/// Field rules for a request body.
///
/// `Raw` is the loosely typed body as received. `check` runs every rule,
/// accumulating failures, and only returns the normalized value when none
/// failed.
pub trait BodyRules: Sized {
    type Raw: DeserializeOwned + Default;

    fn check(raw: Self::Raw) -> Result<Self, FieldErrors>;
}

/// Body extractor that checks the payload with [`BodyRules`].
///
/// A request without a JSON content type, or with an empty body, is checked
/// as an empty object, so the client gets the field errors rather than a
/// media type error. Malformed JSON is rejected with 400.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<NewProduct>) -> String {
///     format!("Creating: {}", input.product_name)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: BodyRules,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await?;

        let raw = if !is_json || bytes.is_empty() {
            T::Raw::default()
        } else {
            let Json(raw) = Json::<T::Raw>::from_bytes(&bytes).map_err(|e| AppError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: e.body_text(),
            })?;
            raw
        };

        T::check(raw).map(ValidatedJson).map_err(AppError::Validation)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
