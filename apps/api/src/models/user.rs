use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

const DEMO_USER_ID: &str = "demo_user";
const DEMO_USER_ROLE: &str = "Program Director";

/// The identity a request acts as.
///
/// Resolved per request so a real authentication scheme can replace the body
/// of `from_request_parts` without touching handlers. Today every request is
/// the demo Program Director; there are no credentials to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
    pub role: String,
}

impl CurrentUser {
    pub fn demo() -> Self {
        CurrentUser {
            user_id: DEMO_USER_ID.to_string(),
            role: DEMO_USER_ROLE.to_string(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser::demo())
    }
}
