use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::social_media::{
        SocialMedia, SocialMediaListItem, SocialMediaRequest, SocialMediaWithOwnerRow,
    },
    utils::validation::ValidJson,
};

pub async fn list_social_medias(
    State(pool): State<PgPool>,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, SocialMediaWithOwnerRow>(
        r#"
        SELECT
            s.id, s.name, s.social_media_url, s.user_id, s.created_at, s.updated_at,
            u.username AS owner_username,
            u.profile_image_url AS owner_profile_image_url
        FROM social_medias s
        JOIN users u ON u.id = s.user_id
        ORDER BY s.id ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let social_medias: Vec<SocialMediaListItem> =
        rows.into_iter().map(SocialMediaListItem::from).collect();

    Ok(Json(json!({ "social_medias": social_medias })))
}

/// Add a social media link for the authenticated user.
pub async fn create_social_media(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    ValidJson(payload): ValidJson<SocialMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let social_media = sqlx::query_as::<_, SocialMedia>(
        r#"
        INSERT INTO social_medias (name, social_media_url, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, social_media_url, user_id, created_at, updated_at
        "#,
    )
    .bind(payload.name)
    .bind(payload.social_media_url)
    .bind(user.id)
    .fetch_one(&pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "social_media": social_media })),
    ))
}

/// Replace a link's name and url.
/// Ownership is enforced by the route's `authorize::<SocialMedia>` layer.
pub async fn update_social_media(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<SocialMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let social_media = sqlx::query_as::<_, SocialMedia>(
        r#"
        UPDATE social_medias
        SET name = $1, social_media_url = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING id, name, social_media_url, user_id, created_at, updated_at
        "#,
    )
    .bind(payload.name)
    .bind(payload.social_media_url)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::BadRequest("No social media updated".to_string()))?;

    Ok(Json(json!({ "social_media": social_media })))
}

pub async fn delete_social_media(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    sqlx::query("DELETE FROM social_medias WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({
        "message": "Your social media has been successfully deleted"
    })))
}
