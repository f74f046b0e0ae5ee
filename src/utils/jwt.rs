// src/utils/jwt.rs

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT Claims structure.
///
/// Tokens carry only the user id and no expiry. `id` is optional on the
/// decode side so a well-signed token without an identity can be told apart
/// from a forged one.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation
}

/// Signs a token for the given user id.
pub fn sign_jwt(id: i64, secret: &str) -> Result<String, AppError> {
    let claims = Claims { id: Some(id) };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a token string.
///
/// Any signature, format or algorithm failure is `AppError::InvalidToken`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|_| AppError::InvalidToken)?;

    Ok(token_data.claims)
}
