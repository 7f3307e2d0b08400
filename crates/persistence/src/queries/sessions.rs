// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{LoginTokenData, SessionData};
use crate::diesel_schema::{login_tokens, sessions};
use crate::error::PersistenceError;

/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    Ok(sessions::table
        .filter(sessions::session_token.eq(session_token))
        .first::<SessionData>(conn)
        .optional()?)
}

/// Retrieves a login token row by token value, consumed or not.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_login_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<LoginTokenData>, PersistenceError> {
    Ok(login_tokens::table
        .filter(login_tokens::token.eq(token))
        .first::<LoginTokenData>(conn)
        .optional()?)
}
