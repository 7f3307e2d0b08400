// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    Ok(users::table
        .filter(users::user_id.eq(user_id))
        .first::<UserData>(conn)
        .optional()?)
}

/// Retrieves a user by email address.
///
/// Emails are stored normalized (trimmed, lowercased), so callers must
/// normalize before lookup.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserData>, PersistenceError> {
    Ok(users::table
        .filter(users::email.eq(email))
        .first::<UserData>(conn)
        .optional()?)
}
