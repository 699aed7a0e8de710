//! Caller identity as handed over by the hosted authentication provider.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Reviewer,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "reviewer" => Some(Self::Reviewer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Reviewer => "reviewer",
            Self::Admin => "admin",
        }
    }

    pub const fn can_review(self) -> bool {
        matches!(self, Self::Reviewer | Self::Admin)
    }
}

/// Authenticated user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Students see only their own records; reviewers and admins see everyone's.
    pub fn can_view(&self, student_id: &str) -> bool {
        self.role.can_review() || self.user_id == student_id
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionRejection {
    MissingHeader(&'static str),
    UnknownRole(String),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let message = match self {
            SessionRejection::MissingHeader(name) => format!("missing {name} header"),
            SessionRejection::UnknownRole(role) => format!("unknown role '{role}'"),
        };
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &'static str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or(SessionRejection::MissingHeader(name))
        };

        let user_id = header(USER_ID_HEADER)?.to_string();
        let raw_role = header(USER_ROLE_HEADER)?;
        let role =
            Role::parse(raw_role).ok_or_else(|| SessionRejection::UnknownRole(raw_role.to_string()))?;

        Ok(Session { user_id, role })
    }
}
