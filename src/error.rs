// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use sqlx::error::ErrorKind;
use std::fmt;

/// Global Application Error Enum.
/// Every handler and middleware returns this; `IntoResponse` below is the
/// only place that turns a failure into a status code and message body.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request: one message per failing field
    Validation(Vec<String>),

    // 400 Bad Request: duplicate email / username
    Uniqueness(String),

    // 400 Bad Request: dangling reference (e.g. comment on a missing photo)
    ForeignKey(String),

    // 400 Bad Request: fixed-text failures such as bad credentials
    BadRequest(String),

    // 401 Unauthorized: no token header
    MissingToken,

    // 401 Unauthorized: token present but not verifiable
    InvalidToken,

    // 401 Unauthorized: no identity attached to the request
    Unauthenticated,

    // 403 Forbidden: identity does not own the resource
    Forbidden,

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large: body over the extractor limit
    PayloadTooLarge,

    // 500 Internal Server Error
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Uniqueness(_)
            | AppError::ForeignKey(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingToken | AppError::InvalidToken | AppError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing `message` value. Internal details never leave here.
    pub fn message(&self) -> Value {
        match self {
            AppError::Validation(messages) => json!(messages),
            AppError::Uniqueness(msg)
            | AppError::ForeignKey(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg) => json!(msg),
            AppError::MissingToken => json!("Token header is required"),
            AppError::InvalidToken => json!("Invalid Token"),
            AppError::Unauthenticated => json!("Unauthorized"),
            AppError::Forbidden => json!("Forbidden, you do not have access to this resource"),
            AppError::PayloadTooLarge => json!("Request body is too large"),
            AppError::InternalServerError(_) => json!("Internal Server Error"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Renders `{"message": ...}` with the mapped HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::InternalServerError(detail) = &self {
            tracing::error!("Internal Server Error: {}", detail);
        }

        let body = Json(json!({
            "message": self.message(),
        }));

        (self.status(), body).into_response()
    }
}

/// Classifies database failures by constraint kind so that `?` on any query
/// yields the right client-facing category.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Data not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    AppError::Uniqueness(unique_message(db_err.constraint()))
                }
                ErrorKind::ForeignKeyViolation => {
                    AppError::ForeignKey(foreign_key_message(db_err.constraint()))
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    AppError::Validation(vec![db_err.message().to_string()])
                }
                _ => AppError::InternalServerError(err.to_string()),
            },
            _ => AppError::InternalServerError(err.to_string()),
        }
    }
}

fn unique_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("users_email_key") => "Email is already registered".to_string(),
        Some("users_username_key") => "Username is already taken".to_string(),
        _ => "Value must be unique".to_string(),
    }
}

fn foreign_key_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("comments_photo_id_fkey") => "Fail to create comment. Can't find photo".to_string(),
        _ => "Can't find relationship between table on database".to_string(),
    }
}

/// Collects every field message, ordered by field name for stable output.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();

        AppError::Validation(messages)
    }
}

/// Body extraction failures get fixed messages; axum's rejection text is only logged.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("JSON body rejected: {}", rejection.body_text());

        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::Validation(vec!["Request body must be JSON".to_string()])
            }
            JsonRejection::JsonSyntaxError(_) => {
                AppError::Validation(vec!["Malformed JSON body".to_string()])
            }
            JsonRejection::JsonDataError(_) => {
                AppError::Validation(vec!["Request body has a field of the wrong type".to_string()])
            }
            JsonRejection::BytesRejection(r) if r.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                AppError::PayloadTooLarge
            }
            _ => AppError::BadRequest("Request body could not be read".to_string()),
        }
    }
}
