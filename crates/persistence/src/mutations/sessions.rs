// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sessions, passwordless login tokens, and rate-limit bookkeeping.
//!
//! All timestamps are stored in `SQLite`'s `CURRENT_TIMESTAMP` format
//! (`YYYY-MM-DD HH:MM:SS`, UTC) so lexical comparisons in SQL are
//! chronological ones. Callers supply expiry strings in that format.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::debug;

use crate::diesel_schema::{login_tokens, rate_limit_hits, sessions};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a session for a user.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;
    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(user_id, session_id, "Created session");
    Ok(session_id)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(sql::<Text>("CURRENT_TIMESTAMP")))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;
    Ok(())
}

/// Deletes all expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(sql::<Text>("CURRENT_TIMESTAMP")))
        .execute(conn)?)
}

/// Stores a login token for an email address.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn create_login_token(
    conn: &mut SqliteConnection,
    token: &str,
    email: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(login_tokens::table)
        .values((
            login_tokens::token.eq(token),
            login_tokens::email.eq(email),
            login_tokens::expires_at.eq(expires_at),
        ))
        .execute(conn)?;
    let token_id: i64 = get_last_insert_rowid(conn)?;
    debug!(token_id, "Created login token");
    Ok(token_id)
}

/// Consumes a login token, returning the email it was issued for.
///
/// Returns `Ok(None)` when the token is unknown, already consumed, or
/// past its expiry. A valid token is marked consumed in the same
/// transaction, so it logs in exactly once.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn consume_login_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<String>, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let live: Option<(i64, String)> = login_tokens::table
            .filter(login_tokens::token.eq(token))
            .filter(login_tokens::consumed.eq(0))
            .filter(login_tokens::expires_at.gt(sql::<Text>("CURRENT_TIMESTAMP")))
            .select((login_tokens::token_id, login_tokens::email))
            .first::<(i64, String)>(conn)
            .optional()?;

        let Some((token_id, email)) = live else {
            return Ok(None);
        };

        diesel::update(login_tokens::table)
            .filter(login_tokens::token_id.eq(token_id))
            .set(login_tokens::consumed.eq(1))
            .execute(conn)?;

        debug!(token_id, "Consumed login token");
        Ok(Some(email))
    })
}

/// Records a rate-limit hit for a key and returns how many hits the key
/// already had inside the window starting at `since`.
///
/// Hits older than the window are garbage-collected on the way out, so
/// the table stays proportional to recent traffic.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn record_rate_limit_hit(
    conn: &mut SqliteConnection,
    key: &str,
    since: &str,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let prior: i64 = rate_limit_hits::table
            .filter(rate_limit_hits::key.eq(key))
            .filter(rate_limit_hits::ts.ge(since))
            .count()
            .get_result(conn)?;

        diesel::insert_into(rate_limit_hits::table)
            .values(rate_limit_hits::key.eq(key))
            .execute(conn)?;

        diesel::delete(rate_limit_hits::table)
            .filter(rate_limit_hits::ts.lt(since))
            .execute(conn)?;

        Ok(prior)
    })
}
