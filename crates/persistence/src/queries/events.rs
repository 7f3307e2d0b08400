// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::EventData;
use crate::diesel_schema::{event_members, events};
use crate::error::PersistenceError;

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_event_by_id(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<EventData>, PersistenceError> {
    Ok(events::table
        .filter(events::event_id.eq(event_id))
        .first::<EventData>(conn)
        .optional()?)
}

/// Retrieves an event by its URL slug.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_event_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<EventData>, PersistenceError> {
    Ok(events::table
        .filter(events::slug.eq(slug))
        .first::<EventData>(conn)
        .optional()?)
}

/// Lists every event the user is a member of, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_events_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<EventData>, PersistenceError> {
    Ok(events::table
        .inner_join(event_members::table)
        .filter(event_members::user_id.eq(user_id))
        .order((events::created_at.desc(), events::event_id.desc()))
        .select(events::all_columns)
        .load::<EventData>(conn)?)
}
