// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for authenticated endpoints.
//!
//! An Axum extractor that validates the bearer token from the
//! Authorization header and hands the handler the authenticated caller.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use nalka_api::{AuthenticationService, CurrentUser};

use crate::AppState;

/// Extractor for the authenticated caller.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate the session token via `AuthenticationService::validate_session`
/// 3. Return the [`CurrentUser`]
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the header is missing or malformed,
/// or the session is unknown or expired.
pub struct SessionUser(pub CurrentUser);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let user: CurrentUser = AuthenticationService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(user_id = user.user_id, "Session validated successfully");

        Ok(Self(user))
    }
}

/// Session extraction errors, converted straight into 401 responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
