// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_numeric, validate_url_string};

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique, validated email address. Used as the login name.
    pub email: String,

    pub full_name: String,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub profile_image_url: String,
    pub age: i32,
    pub phone_number: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Public profile returned after registration.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub profile_image_url: String,
    pub age: i32,
    pub phone_number: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            full_name: user.full_name,
            username: user.username,
            profile_image_url: user.profile_image_url,
            age: user.age,
            phone_number: user.phone_number,
        }
    }
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "Email cannot be omitted"),
        length(min = 1, message = "Email cannot be an empty string"),
        email(message = "Email format is invalid")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Full name cannot be omitted"),
        length(min = 1, message = "Full name cannot be an empty string")
    )]
    pub full_name: Option<String>,

    #[validate(
        required(message = "Username cannot be omitted"),
        length(min = 1, max = 255, message = "Username length must be between 1 and 255 characters")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Password cannot be omitted"),
        length(min = 1, max = 128, message = "Password length must be between 1 and 128 characters")
    )]
    pub password: Option<String>,

    #[validate(
        required(message = "Profile image url cannot be omitted"),
        custom(function = validate_url_string, message = "Profile image url must be in URL format")
    )]
    pub profile_image_url: Option<String>,

    #[validate(
        required(message = "Age cannot be omitted"),
        range(min = 0, message = "Age must be a positive number")
    )]
    pub age: Option<i32>,

    #[validate(
        required(message = "Phone number cannot be omitted"),
        custom(function = validate_numeric, message = "Phone number must be numeric")
    )]
    pub phone_number: Option<String>,
}

/// DTO for updating a user's profile. Password changes are not accepted here.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        required(message = "Email cannot be omitted"),
        email(message = "Email format is invalid")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Full name cannot be omitted"),
        length(min = 1, message = "Full name cannot be an empty string")
    )]
    pub full_name: Option<String>,

    #[validate(
        required(message = "Username cannot be omitted"),
        length(min = 1, max = 255, message = "Username length must be between 1 and 255 characters")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Profile image url cannot be omitted"),
        custom(function = validate_url_string, message = "Profile image url must be in URL format")
    )]
    pub profile_image_url: Option<String>,

    #[validate(
        required(message = "Age cannot be omitted"),
        range(min = 0, message = "Age must be a positive number")
    )]
    pub age: Option<i32>,

    #[validate(
        required(message = "Phone number cannot be omitted"),
        custom(function = validate_numeric, message = "Phone number must be numeric")
    )]
    pub phone_number: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Email cannot be omitted"))]
    pub email: Option<String>,
    #[validate(required(message = "Password cannot be omitted"))]
    pub password: Option<String>,
}
