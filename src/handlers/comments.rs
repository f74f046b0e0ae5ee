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
    models::comment::{
        Comment, CommentListItem, CommentListRow, CreateCommentRequest, UpdateCommentRequest,
    },
    utils::validation::ValidJson,
};

/// List all comments with the photo they belong to and their author.
pub async fn list_comments(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, CommentListRow>(
        r#"
        SELECT
            c.id, c.comment, c.user_id, c.photo_id, c.created_at, c.updated_at,
            p.title AS photo_title,
            p.caption AS photo_caption,
            p.poster_image_url AS photo_poster_image_url,
            u.username AS author_username,
            u.profile_image_url AS author_profile_image_url,
            u.phone_number AS author_phone_number
        FROM comments c
        JOIN photos p ON p.id = c.photo_id
        JOIN users u ON u.id = c.user_id
        ORDER BY c.id ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let comments: Vec<CommentListItem> = rows.into_iter().map(CommentListItem::from).collect();

    Ok(Json(json!({ "comments": comments })))
}

/// Create a comment on a photo.
/// An unknown `PhotoId` trips the foreign key and comes back as a 400.
pub async fn create_comment(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    ValidJson(payload): ValidJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (comment, user_id, photo_id)
        VALUES ($1, $2, $3)
        RETURNING id, comment, user_id, photo_id, created_at, updated_at
        "#,
    )
    .bind(payload.comment)
    .bind(user.id)
    .bind(payload.photo_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

/// Edit a comment's text.
/// Ownership is enforced by the route's `authorize::<Comment>` layer.
pub async fn update_comment(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET comment = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, comment, user_id, photo_id, created_at, updated_at
        "#,
    )
    .bind(payload.comment)
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::BadRequest("No comment updated".to_string()))?;

    Ok(Json(json!({ "comment": comment })))
}

pub async fn delete_comment(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({
        "message": "Your comment has been successfully deleted"
    })))
}
