// src/middleware/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::{config::Config, error::AppError, utils::jwt::verify_jwt};

/// Request header carrying the identity token.
pub const TOKEN_HEADER: &str = "token";

/// Authenticated identity attached to the request by `auth_middleware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

/// Axum Middleware: Authentication.
///
/// Reads the `token` header and verifies it. On success an `AuthUser` is
/// inserted into the request extensions; otherwise the request stops with
/// `MissingToken` or `InvalidToken`.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(req.headers(), &config.jwt_secret)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthUser, AppError> {
    let token = headers
        .get(TOKEN_HEADER)
        .ok_or(AppError::MissingToken)?
        .to_str()
        .map_err(|_| AppError::InvalidToken)?;

    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    let claims = verify_jwt(token, secret)?;
    let id = claims.id.ok_or(AppError::InvalidToken)?;

    Ok(AuthUser { id })
}
