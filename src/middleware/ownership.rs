// src/middleware/ownership.rs

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Path, State, rejection::PathRejection},
    http::Request,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::{comment::Comment, photo::Photo, social_media::SocialMedia, user::User},
};

/// A row that belongs to exactly one user and can be looked up by id.
#[async_trait]
pub trait OwnedResource: Sized + Send {
    /// Loads the resource, `None` when no row has this id.
    async fn find(pool: &PgPool, id: i64) -> Result<Option<Self>, AppError>;

    /// Id of the user who controls this resource.
    fn owner_id(&self) -> i64;

    fn not_found() -> AppError;
}

/// Checks that the authenticated user owns the resource named by the `{id}`
/// path segment.
///
/// Runs after `auth_middleware`. Order of failures: no identity (401),
/// unknown id (404), foreign owner (403).
pub async fn authorize<R: OwnedResource + 'static>(
    State(pool): State<PgPool>,
    id: Result<Path<i64>, PathRejection>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or(AppError::Unauthenticated)?;

    // A non-numeric id can never name a row.
    let Ok(Path(id)) = id else {
        return Err(R::not_found());
    };

    let resource = R::find(&pool, id).await?.ok_or_else(R::not_found)?;
    check_owner(&resource, user)?;

    Ok(next.run(req).await)
}

/// Strict id comparison; no string/number coercion.
pub fn check_owner<R: OwnedResource>(resource: &R, user: AuthUser) -> Result<(), AppError> {
    if resource.owner_id() != user.id {
        tracing::debug!(
            owner = resource.owner_id(),
            requester = user.id,
            "ownership check failed"
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[async_trait]
impl OwnedResource for User {
    async fn find(pool: &PgPool, id: i64) -> Result<Option<Self>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    fn owner_id(&self) -> i64 {
        self.id
    }

    fn not_found() -> AppError {
        AppError::NotFound("User not found".to_string())
    }
}

#[async_trait]
impl OwnedResource for Photo {
    async fn find(pool: &PgPool, id: i64) -> Result<Option<Self>, AppError> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, title, caption, poster_image_url, user_id, created_at, updated_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(photo)
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn not_found() -> AppError {
        AppError::NotFound("Photo not found".to_string())
    }
}

#[async_trait]
impl OwnedResource for Comment {
    async fn find(pool: &PgPool, id: i64) -> Result<Option<Self>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, comment, user_id, photo_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(comment)
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn not_found() -> AppError {
        AppError::NotFound("Comment not found".to_string())
    }
}

#[async_trait]
impl OwnedResource for SocialMedia {
    async fn find(pool: &PgPool, id: i64) -> Result<Option<Self>, AppError> {
        let social_media = sqlx::query_as::<_, SocialMedia>(
            r#"
            SELECT id, name, social_media_url, user_id, created_at, updated_at
            FROM social_medias
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(social_media)
    }

    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn not_found() -> AppError {
        AppError::NotFound("Social Media not found".to_string())
    }
}
