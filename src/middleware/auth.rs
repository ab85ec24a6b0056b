use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;
use crate::repositories::SessionRepository;

/// The coach behind a valid `Authorization: Bearer <token>` header.
///
/// Needs `Extension(SessionRepository)` on the router.
#[derive(Clone, Debug)]
pub struct AuthCoach {
    pub coach_id: String,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthCoach
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("Token is missing".to_string()))?;

        let token = bearer.token().trim().to_string();
        if token.is_empty() {
            return Err(AppError::Unauthorized("Token is missing".to_string()));
        }

        let sessions = parts
            .extensions
            .get::<SessionRepository>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session repository not configured".to_string()))?;

        let coach_id = sessions
            .find_valid(&token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthCoach { coach_id, token })
    }
}
