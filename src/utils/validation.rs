// src/utils/validation.rs

use std::sync::LazyLock;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use regex::Regex;
use serde::de::DeserializeOwned;
use url::Url;
use validator::{Validate, ValidationError};

use crate::{error::AppError, utils::html::visible_text};

/// JSON body extractor that also runs the payload's `Validate` rules.
///
/// Rule failures and unreadable bodies surface through `AppError`'s `From` impls.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("numeric pattern is valid"));

/// Validates that a string is a correctly formatted absolute URL.
pub fn validate_url_string(url: &str) -> Result<(), ValidationError> {
    if Url::parse(url).is_err() {
        return Err(ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// Validates a digits-only string, optionally signed (e.g. `+62823111111`).
pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if !NUMERIC.is_match(value) {
        return Err(ValidationError::new("not_numeric"));
    }
    Ok(())
}

/// Rejects free text that is nothing but markup (e.g. `<script>x</script>`).
///
/// The value itself is stored as sent; empty input is left to the length rule.
pub fn validate_has_text(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && visible_text(value).trim().is_empty() {
        return Err(ValidationError::new("no_visible_text"));
    }
    Ok(())
}
