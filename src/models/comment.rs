use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::validate_has_text;

/// Represents the 'comments' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: i64,
    pub comment: String,
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "PhotoId")]
    pub photo_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        required(message = "Comment cannot be omitted"),
        length(min = 1, max = 1000, message = "Comment must be between 1 and 1000 characters"),
        custom(function = validate_has_text, message = "Comment cannot be an empty string")
    )]
    pub comment: Option<String>,

    /// The photo being commented on. Existence is checked by the store.
    #[serde(rename = "PhotoId")]
    #[validate(required(message = "Photo ID cannot be omitted"))]
    pub photo_id: Option<i64>,
}

/// DTO for editing a comment's text.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(
        required(message = "Comment cannot be omitted"),
        length(min = 1, max = 1000, message = "Comment must be between 1 and 1000 characters"),
        custom(function = validate_has_text, message = "Comment cannot be an empty string")
    )]
    pub comment: Option<String>,
}

/// Flat row for the comment listing join (comment + photo + author).
#[derive(Debug, FromRow)]
pub struct CommentListRow {
    pub id: i64,
    pub comment: String,
    pub user_id: i64,
    pub photo_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub photo_title: String,
    pub photo_caption: String,
    pub photo_poster_image_url: String,
    pub author_username: String,
    pub author_profile_image_url: String,
    pub author_phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct CommentPhoto {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub poster_image_url: String,
}

#[derive(Debug, Serialize)]
pub struct CommentUser {
    pub id: i64,
    pub username: String,
    pub profile_image_url: String,
    pub phone_number: String,
}

/// A comment in the listing, with the photo and author nested.
#[derive(Debug, Serialize)]
pub struct CommentListItem {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(rename = "Photo")]
    pub photo: CommentPhoto,
    #[serde(rename = "User")]
    pub user: CommentUser,
}

impl From<CommentListRow> for CommentListItem {
    fn from(row: CommentListRow) -> Self {
        Self {
            photo: CommentPhoto {
                id: row.photo_id,
                title: row.photo_title,
                caption: row.photo_caption,
                poster_image_url: row.photo_poster_image_url,
            },
            user: CommentUser {
                id: row.user_id,
                username: row.author_username,
                profile_image_url: row.author_profile_image_url,
                phone_number: row.author_phone_number,
            },
            comment: Comment {
                id: row.id,
                comment: row.comment,
                user_id: row.user_id,
                photo_id: row.photo_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
