// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::user::{CreateUserRequest, LoginRequest, UpdateUserRequest, User, UserProfile},
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
        validation::ValidJson,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the public profile (never the password).
pub async fn register(
    State(pool): State<PgPool>,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hashed_password = hash_password(payload.password.as_deref().unwrap_or_default())?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, full_name, username, password, profile_image_url, age, phone_number)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(payload.email)
    .bind(payload.full_name)
    .bind(payload.username)
    .bind(hashed_password)
    .bind(payload.profile_image_url)
    .bind(payload.age)
    .bind(payload.phone_number)
    .fetch_one(&pool)
    .await?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": UserProfile::from(user) })),
    ))
}

/// Authenticates a user by email and password and returns a token.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::BadRequest(
            "Fail, email is not registered".to_string(),
        ))?;

    let is_valid = verify_password(
        payload.password.as_deref().unwrap_or_default(),
        &user.password,
    )?;

    if !is_valid {
        return Err(AppError::BadRequest(
            "Fail, your password is incorrect".to_string(),
        ));
    }

    let token = sign_jwt(user.id, &config.jwt_secret)?;

    Ok(Json(json!({ "token": token })))
}

/// Replaces the profile fields of the authenticated user.
/// Ownership is enforced by the route's `authorize::<User>` layer.
pub async fn update_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET email = $1, full_name = $2, username = $3,
            profile_image_url = $4, age = $5, phone_number = $6,
            updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(payload.email)
    .bind(payload.full_name)
    .bind(payload.username)
    .bind(payload.profile_image_url)
    .bind(payload.age)
    .bind(payload.phone_number)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::BadRequest("No user updated".to_string()))?;

    Ok(Json(json!({ "user": user })))
}

/// Deletes the authenticated user. Photos, comments and social medias go
/// with it through the cascading foreign keys.
pub async fn delete_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = id, "user deleted");

    Ok(Json(json!({
        "message": "Your account has been successfully deleted"
    })))
}
