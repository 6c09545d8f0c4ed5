//! Custom extractors that validate before the handler runs.
//!
//! Both reject with [`crate::AppError::Validation`], so a failed check
//! answers 400 with the `errors` array and the handler never executes.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::{BodyRules, ValidatedJson};
