use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_has_text, validate_url_string};

/// Represents the 'social_medias' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SocialMedia {
    pub id: i64,
    pub name: String,
    pub social_media_url: String,
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating or replacing a social media link.
#[derive(Debug, Deserialize, Validate)]
pub struct SocialMediaRequest {
    #[validate(
        required(message = "Name cannot be omitted"),
        length(min = 1, max = 255, message = "Name cannot be an empty string"),
        custom(function = validate_has_text, message = "Name cannot be an empty string")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Social Media URL cannot be omitted"),
        length(min = 1, message = "Social Media URL cannot be an empty string"),
        custom(function = validate_url_string, message = "Social Media URL must be in URL format")
    )]
    pub social_media_url: Option<String>,
}

/// Flat row for the listing join (link + owner columns).
#[derive(Debug, FromRow)]
pub struct SocialMediaWithOwnerRow {
    pub id: i64,
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_profile_image_url: String,
}

#[derive(Debug, Serialize)]
pub struct SocialMediaOwner {
    pub id: i64,
    pub username: String,
    pub profile_image_url: String,
}

#[derive(Debug, Serialize)]
pub struct SocialMediaListItem {
    #[serde(flatten)]
    pub social_media: SocialMedia,
    #[serde(rename = "User")]
    pub user: SocialMediaOwner,
}

impl From<SocialMediaWithOwnerRow> for SocialMediaListItem {
    fn from(row: SocialMediaWithOwnerRow) -> Self {
        Self {
            user: SocialMediaOwner {
                id: row.user_id,
                username: row.owner_username,
                profile_image_url: row.owner_profile_image_url,
            },
            social_media: SocialMedia {
                id: row.id,
                name: row.name,
                social_media_url: row.social_media_url,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
