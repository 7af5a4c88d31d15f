//! Request authentication.
//!
//! [`AuthUser`] is the identity every protected rotation, pattern, and
//! notification handler starts from: the user id and role are taken from the
//! verified JWT claims, never from the request body or path, so an employee
//! can only ever act on their own schedule data.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use schichtplan_core::error::CoreError;
use schichtplan_core::roles::Role;
use schichtplan_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from a `Bearer` token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Internal database id of the caller (from `claims.sub`).
    pub user_id: DbId,
    /// Parsed role; a token carrying an unknown role string never gets here.
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Pull the raw token out of the `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // A role string the platform does not know is as good as no token.
        let role = Role::parse(&claims.role).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
