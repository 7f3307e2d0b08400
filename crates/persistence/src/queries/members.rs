// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{MemberData, MembershipData};
use crate::diesel_schema::{event_members, users};
use crate::error::PersistenceError;

/// Retrieves the stored role string for a membership, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn membership_role(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<Option<String>, PersistenceError> {
    Ok(event_members::table
        .filter(event_members::event_id.eq(event_id))
        .filter(event_members::user_id.eq(user_id))
        .select(event_members::role)
        .first::<String>(conn)
        .optional()?)
}

/// Counts the members of an event, leaving out one user.
///
/// Used by the post-departure cleanup while the departing user's
/// membership row still exists inside the transaction.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn member_count_excluding(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(event_members::table
        .filter(event_members::event_id.eq(event_id))
        .filter(event_members::user_id.ne(user_id))
        .count()
        .get_result(conn)?)
}

/// Lists the members of an event with their account fields, in join order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_members(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<MemberData>, PersistenceError> {
    Ok(event_members::table
        .inner_join(users::table)
        .filter(event_members::event_id.eq(event_id))
        .order((event_members::created_at.asc(), event_members::membership_id.asc()))
        .select((
            users::user_id,
            users::email,
            users::name,
            event_members::role,
            event_members::created_at,
        ))
        .load::<MemberData>(conn)?)
}

/// Lists every membership a user holds.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn memberships_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<MembershipData>, PersistenceError> {
    Ok(event_members::table
        .filter(event_members::user_id.eq(user_id))
        .load::<MembershipData>(conn)?)
}
