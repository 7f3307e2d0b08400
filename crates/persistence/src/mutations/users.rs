// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use nalka_domain::MemberRole;
use tracing::info;

use crate::diesel_schema::{events, users};
use crate::error::PersistenceError;
use crate::mutations::draw::repair_assignments_on_departure;
use crate::queries;

/// Creates a user for an email address, or returns the existing one.
///
/// The email must already be normalized (trimmed, lowercased).
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_user(
    conn: &mut SqliteConnection,
    email: &str,
    name: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((users::email.eq(email), users::name.eq(name)))
        .on_conflict(users::email)
        .do_nothing()
        .execute(conn)?;

    let user_id: i64 = users::table
        .filter(users::email.eq(email))
        .select(users::user_id)
        .first::<i64>(conn)?;
    Ok(user_id)
}

/// Updates a user's display name.
///
/// # Errors
///
/// Returns an error if the user does not exist or the update fails.
pub fn update_user_name(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: Option<&str>,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::name.eq(name))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::UserNotFound(user_id));
    }
    Ok(())
}

/// Deletes an account and everything it owns.
///
/// For every event the user belongs to without owning it, the
/// assignment graph is repaired around their departure first. Events
/// the user owns are deleted outright. The user row goes last;
/// memberships, lists, reservations, and sessions follow by cascade.
/// One transaction covers the whole teardown.
///
/// # Errors
///
/// Returns an error if the user does not exist or a database operation
/// fails.
pub fn delete_account(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let memberships = queries::members::memberships_for_user(conn, user_id)?;
        let mut owned: Vec<i64> = Vec::new();
        for membership in &memberships {
            if membership.role == MemberRole::Owner.as_str() {
                owned.push(membership.event_id);
            } else {
                repair_assignments_on_departure(conn, membership.event_id, user_id)?;
            }
        }

        if !owned.is_empty() {
            diesel::delete(events::table)
                .filter(events::event_id.eq_any(&owned))
                .execute(conn)?;
        }

        let rows: usize = diesel::delete(users::table)
            .filter(users::user_id.eq(user_id))
            .execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::UserNotFound(user_id));
        }

        info!(
            user_id,
            owned_events = owned.len(),
            memberships = memberships.len(),
            "Deleted account"
        );
        Ok(())
    })
}
