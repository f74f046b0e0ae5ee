use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_has_text, validate_url_string};

/// Represents the 'photos' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub poster_image_url: String,

    /// Owner. Always taken from the authenticated identity, never the body.
    #[serde(rename = "UserId")]
    pub user_id: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Body returned by photo creation.
#[derive(Debug, Serialize)]
pub struct CreatedPhoto {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub poster_image_url: String,
    #[serde(rename = "UserId")]
    pub user_id: i64,
}

impl From<Photo> for CreatedPhoto {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            poster_image_url: photo.poster_image_url,
            user_id: photo.user_id,
        }
    }
}

/// Flat row for the photo listing join (photo + owner columns).
#[derive(Debug, FromRow)]
pub struct PhotoWithOwnerRow {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub poster_image_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_profile_image_url: String,
}

/// Flat row for comments attached to listed photos.
#[derive(Debug, FromRow)]
pub struct PhotoCommentRow {
    pub photo_id: i64,
    pub comment: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoOwner {
    pub id: i64,
    pub username: String,
    pub profile_image_url: String,
}

#[derive(Debug, Serialize)]
pub struct CommentAuthor {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoComment {
    pub comment: String,
    #[serde(rename = "User")]
    pub user: CommentAuthor,
}

impl From<PhotoCommentRow> for PhotoComment {
    fn from(row: PhotoCommentRow) -> Self {
        Self {
            comment: row.comment,
            user: CommentAuthor {
                username: row.username,
            },
        }
    }
}

/// A photo in the listing, with its owner and comments nested.
#[derive(Debug, Serialize)]
pub struct PhotoListItem {
    #[serde(flatten)]
    pub photo: Photo,
    #[serde(rename = "User")]
    pub user: PhotoOwner,
    #[serde(rename = "Comments")]
    pub comments: Vec<PhotoComment>,
}

impl PhotoListItem {
    pub fn from_row(row: PhotoWithOwnerRow, comments: Vec<PhotoComment>) -> Self {
        Self {
            user: PhotoOwner {
                id: row.user_id,
                username: row.owner_username,
                profile_image_url: row.owner_profile_image_url,
            },
            photo: Photo {
                id: row.id,
                title: row.title,
                caption: row.caption,
                poster_image_url: row.poster_image_url,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            comments,
        }
    }
}

/// DTO for creating or replacing a photo.
#[derive(Debug, Deserialize, Validate)]
pub struct PhotoRequest {
    #[validate(
        required(message = "Title cannot be omitted"),
        length(min = 1, max = 255, message = "Title cannot be an empty string"),
        custom(function = validate_has_text, message = "Title cannot be an empty string")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Caption cannot be omitted"),
        length(min = 1, message = "Caption cannot be an empty string"),
        custom(function = validate_has_text, message = "Caption cannot be an empty string")
    )]
    pub caption: Option<String>,

    #[validate(
        required(message = "Url poster image cannot be omitted"),
        length(min = 1, message = "Url poster image cannot be an empty string"),
        custom(function = validate_url_string, message = "Wrong url format")
    )]
    pub poster_image_url: Option<String>,
}
