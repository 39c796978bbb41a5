use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::ApiError, state::AppState};
use shared::models::auth::Identity;
use shared::services::auth_service::AuthServiceTrait;

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.user_id, &self.email)
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or(ApiError::Unauthorized)?
            .to_str()
            .map_err(|_| ApiError::Unauthorized)?;

        // Check if it starts with "Bearer "
        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized);
        }

        // Extract the token (remove "Bearer " prefix)
        let token = &auth_header[7..];

        let identity = state
            .auth_service
            .identity_from_token(token)
            .map_err(ApiError::from)?;

        Ok(AuthenticatedUser {
            user_id: identity.user_id,
            email: identity.email,
        })
    }
}
