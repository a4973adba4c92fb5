use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(Uuid),
    #[error("no account for email: {0}")]
    UnknownEmail(String),
    #[error("like not found")]
    LikeNotFound { liker_id: Uuid, liked_id: Uuid },
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("user already liked")]
    AlreadyLiked { liker_id: Uuid, liked_id: Uuid },
    #[error("invalid credentials")]
    InvalidCredential,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::UserNotFound(_) | DomainError::LikeNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            // login failures surface as 400, matching the public API
            DomainError::UnknownEmail(_)
            | DomainError::DuplicateEmail(_)
            | DomainError::AlreadyLiked { .. }
            | DomainError::InvalidCredential
            | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::UserNotFound(id) => Some(json!({ "resource": id })),
            DomainError::LikeNotFound { liker_id, liked_id }
            | DomainError::AlreadyLiked { liker_id, liked_id } => {
                Some(json!({ "likerId": liker_id, "likedId": liked_id }))
            }
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
