// amoura-backend/src/middleware/auth.rs

use crate::api::AppState;
use crate::domain::user_model::UserClaims;
use crate::error::AppError;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use tracing::warn;

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: UserClaims,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> uuid::Uuid {
        self.claims.user_id
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let claims = state.jwt_manager.verify_access_token(token).map_err(|e| {
            warn!(error = %e, "Access token verification failed");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        if !claims.user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        Ok(AuthenticatedUser {
            claims: claims.user,
        })
    }
}
