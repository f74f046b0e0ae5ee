use std::collections::HashMap;

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
    models::photo::{
        CreatedPhoto, Photo, PhotoComment, PhotoCommentRow, PhotoListItem, PhotoRequest,
        PhotoWithOwnerRow,
    },
    utils::validation::ValidJson,
};

/// List all photos with their owner and comments.
pub async fn list_photos(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, PhotoWithOwnerRow>(
        r#"
        SELECT
            p.id, p.title, p.caption, p.poster_image_url, p.user_id,
            p.created_at, p.updated_at,
            u.username AS owner_username,
            u.profile_image_url AS owner_profile_image_url
        FROM photos p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.id ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let photo_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

    let comment_rows = sqlx::query_as::<_, PhotoCommentRow>(
        r#"
        SELECT c.photo_id, c.comment, u.username
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.photo_id = ANY($1)
        ORDER BY c.id ASC
        "#,
    )
    .bind(&photo_ids)
    .fetch_all(&pool)
    .await?;

    let mut comments_by_photo: HashMap<i64, Vec<PhotoComment>> = HashMap::new();
    for row in comment_rows {
        comments_by_photo
            .entry(row.photo_id)
            .or_default()
            .push(PhotoComment::from(row));
    }

    let photos: Vec<PhotoListItem> = rows
        .into_iter()
        .map(|row| {
            let comments = comments_by_photo.remove(&row.id).unwrap_or_default();
            PhotoListItem::from_row(row, comments)
        })
        .collect();

    Ok(Json(json!({ "photos": photos })))
}

/// Create a new photo owned by the authenticated user.
pub async fn create_photo(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    ValidJson(payload): ValidJson<PhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let photo = sqlx::query_as::<_, Photo>(
        r#"
        INSERT INTO photos (title, caption, poster_image_url, user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, caption, poster_image_url, user_id, created_at, updated_at
        "#,
    )
    .bind(payload.title)
    .bind(payload.caption)
    .bind(payload.poster_image_url)
    .bind(user.id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(CreatedPhoto::from(photo))))
}

/// Replace a photo's title, caption and poster url.
/// Ownership is enforced by the route's `authorize::<Photo>` layer.
pub async fn update_photo(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<PhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let photo = sqlx::query_as::<_, Photo>(
        r#"
        UPDATE photos
        SET title = $1, caption = $2, poster_image_url = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING id, title, caption, poster_image_url, user_id, created_at, updated_at
        "#,
    )
    .bind(payload.title)
    .bind(payload.caption)
    .bind(payload.poster_image_url)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::BadRequest("No photo updated".to_string()))?;

    Ok(Json(json!({ "photo": photo })))
}

/// Delete a photo; its comments cascade.
pub async fn delete_photo(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    sqlx::query("DELETE FROM photos WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({
        "message": "Your photo has been successfully deleted"
    })))
}
