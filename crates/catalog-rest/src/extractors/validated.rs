//! Validated JSON extractor.
//!
//! Deserializes the body and runs the `validator` rules of the target type.
//! Both malformed JSON and failed rules are rejected as `ValidationFailed`
//! (400) and rendered with the structured error body.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use catalog_core::{validation_errors_to_catalog_error, CatalogError};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(CatalogError::validation(rejection.body_text())))?;

        value
            .validate()
            .map_err(|errors| AppError(validation_errors_to_catalog_error(errors)))?;

        Ok(ValidatedJson(value))
    }
}
