// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads over the Secret Santa assignment graph.
//!
//! The graph is stored as one row per giver; every read the repair
//! planner needs is a single-row lookup of an incident edge.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::AssignmentData;
use crate::diesel_schema::{assignments, gift_lists};
use crate::error::PersistenceError;

/// The draw population: distinct gift-list owners of the event, ordered
/// by list creation time.
///
/// Owners are distinct by construction (one list per owner per event).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn draw_participants(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(gift_lists::table
        .filter(gift_lists::event_id.eq(event_id))
        .order((gift_lists::created_at.asc(), gift_lists::list_id.asc()))
        .select(gift_lists::owner_id)
        .load::<i64>(conn)?)
}

/// The receiver the given user gives to in this event, if drawn.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn outgoing_assignment(
    conn: &mut SqliteConnection,
    event_id: i64,
    giver_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    Ok(assignments::table
        .filter(assignments::event_id.eq(event_id))
        .filter(assignments::giver_id.eq(giver_id))
        .select(assignments::receiver_id)
        .first::<i64>(conn)
        .optional()?)
}

/// The giver who gives to the given user in this event, if drawn.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn incoming_assignment(
    conn: &mut SqliteConnection,
    event_id: i64,
    receiver_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    Ok(assignments::table
        .filter(assignments::event_id.eq(event_id))
        .filter(assignments::receiver_id.eq(receiver_id))
        .select(assignments::giver_id)
        .first::<i64>(conn)
        .optional()?)
}

/// Every edge of an event's assignment graph, ordered by giver.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn assignments_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<AssignmentData>, PersistenceError> {
    Ok(assignments::table
        .filter(assignments::event_id.eq(event_id))
        .order(assignments::giver_id.asc())
        .load::<AssignmentData>(conn)?)
}
