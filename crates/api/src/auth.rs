// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Passwordless session authentication.
//!
//! Login is a two-step flow: the caller requests a login token for an
//! email address (delivery of that token is the mail boundary's job,
//! outside this crate), then trades the token for a 30-day session.
//! Accounts are created lazily on first login.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tracing::info;

use nalka_domain::validate_email;
use nalka_persistence::{Persistence, SessionData, UserData};

use crate::error::ApiError;
use crate::rate_limit;

/// Timestamp format shared with the database (`CURRENT_TIMESTAMP`,
/// UTC), so expiry strings compare chronologically in SQL.
const SQL_DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// Session-based authentication over the persistence layer.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Login tokens are short-lived; the email round-trip should take
    /// minutes, not hours.
    const LOGIN_TOKEN_EXPIRATION: Duration = Duration::minutes(15);

    /// Default session expiration duration (30 days).
    const SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Login-token requests allowed per client address per window.
    const LOGIN_REQUESTS_PER_IP: i64 = 10;

    /// Login-token requests allowed per email address per window.
    const LOGIN_REQUESTS_PER_EMAIL: i64 = 5;

    /// Requests a login token for an email address.
    ///
    /// The token is persisted with a 15-minute expiry and returned to
    /// the caller, whose job is to deliver it out of band.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is invalid, a rate limit trips,
    /// or persistence fails.
    pub fn request_login_token(
        persistence: &mut Persistence,
        email: &str,
        client_ip: &str,
    ) -> Result<String, ApiError> {
        let email: String = validate_email(email)?;

        rate_limit::enforce_limit(
            persistence,
            &format!("login:ip:{client_ip}"),
            Self::LOGIN_REQUESTS_PER_IP,
            Self::LOGIN_TOKEN_EXPIRATION,
        )?;
        rate_limit::enforce_limit(
            persistence,
            &format!("login:email:{email}"),
            Self::LOGIN_REQUESTS_PER_EMAIL,
            Self::LOGIN_TOKEN_EXPIRATION,
        )?;

        let token: String = generate_token("login");
        let expires_at: String = format_timestamp(
            OffsetDateTime::now_utc() + Self::LOGIN_TOKEN_EXPIRATION,
        )?;
        persistence.create_login_token(&token, &email, &expires_at)?;

        info!(email, "Issued login token");
        Ok(token)
    }

    /// Trades a login token for a session, creating the account on
    /// first login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] if the token is unknown,
    /// consumed, or expired, or an error if persistence fails.
    pub fn login_with_token(
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<(String, CurrentUser), ApiError> {
        let email: String = persistence.consume_login_token(token)?.ok_or_else(|| {
            ApiError::Unauthenticated(String::from("Invalid or expired login token"))
        })?;

        let user_id: i64 = persistence.upsert_user(&email, None)?;
        let user: UserData = persistence
            .get_user_by_id(user_id)?
            .ok_or_else(|| ApiError::Internal(format!("User {user_id} vanished after upsert")))?;

        let session_token: String = generate_token("session");
        let expires_at: String =
            format_timestamp(OffsetDateTime::now_utc() + Self::SESSION_EXPIRATION)?;
        persistence.create_session(&session_token, user_id, &expires_at)?;

        info!(user_id, "Logged in");
        Ok((
            session_token,
            CurrentUser {
                user_id: user.user_id,
                email: user.email,
                name: user.name,
            },
        ))
    }

    /// Validates a session token and returns the authenticated caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] if the session is unknown
    /// or expired, or an error if persistence fails.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<CurrentUser, ApiError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)?
            .ok_or_else(|| ApiError::Unauthenticated(String::from("Invalid session token")))?;

        let expires_at: OffsetDateTime = parse_timestamp(&session.expires_at)?;
        if OffsetDateTime::now_utc() > expires_at {
            return Err(ApiError::Unauthenticated(String::from("Session expired")));
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)?
            .ok_or_else(|| ApiError::Unauthenticated(String::from("Account no longer exists")))?;

        persistence.update_session_activity(session.session_id)?;

        Ok(CurrentUser {
            user_id: user.user_id,
            email: user.email,
            name: user.name,
        })
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
        persistence.delete_session(session_token)?;
        Ok(())
    }
}

/// Generates an opaque token.
///
/// Not a hardened CSPRNG scheme; the nanosecond timestamp plus 64
/// random bits is enough entropy for this service's threat model.
fn generate_token(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp: u128 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}_{timestamp}_{}", rand::random::<u64>())
}

/// Formats a timestamp the way the database stores them.
pub(crate) fn format_timestamp(moment: OffsetDateTime) -> Result<String, ApiError> {
    moment
        .format(&SQL_DATETIME)
        .map_err(|e| ApiError::Internal(format!("Failed to format timestamp: {e}")))
}

/// Parses a database-format timestamp as UTC.
fn parse_timestamp(value: &str) -> Result<OffsetDateTime, ApiError> {
    PrimitiveDateTime::parse(value, &SQL_DATETIME)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| ApiError::Internal(format!("Failed to parse timestamp '{value}': {e}")))
}
