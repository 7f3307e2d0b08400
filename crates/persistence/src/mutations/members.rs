// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Membership lifecycle: invites, voluntary departure, removal.
//!
//! Leaving and removal differ only in what happens to the departing
//! user's reservations: a leaver's reservations are deleted, a removed
//! member's are released back to the pool so the items stay claimable.
//! Both share the assignment repair in `mutations::draw`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use nalka_domain::ReservationStatus;
use tracing::info;

use crate::diesel_schema::{event_members, gift_lists, reservations};
use crate::error::PersistenceError;
use crate::mutations::draw::repair_assignments_on_departure;
use crate::mutations::users::upsert_user;
use crate::queries;

/// Adds a user to an event by email, creating the account and their
/// gift list as needed. Idempotent for existing members.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn invite_member(
    conn: &mut SqliteConnection,
    event_id: i64,
    email: &str,
    list_title: &str,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let user_id: i64 = upsert_user(conn, email, None)?;

        diesel::insert_into(event_members::table)
            .values((
                event_members::event_id.eq(event_id),
                event_members::user_id.eq(user_id),
            ))
            .on_conflict((event_members::event_id, event_members::user_id))
            .do_nothing()
            .execute(conn)?;

        diesel::insert_into(gift_lists::table)
            .values((
                gift_lists::event_id.eq(event_id),
                gift_lists::owner_id.eq(user_id),
                gift_lists::title.eq(list_title),
            ))
            .on_conflict((gift_lists::event_id, gift_lists::owner_id))
            .do_nothing()
            .execute(conn)?;

        info!(event_id, user_id, "Invited member");
        Ok(user_id)
    })
}

/// A member leaves an event of their own accord.
///
/// In one transaction: repair the assignment graph around the leaver,
/// delete their reservations on the event's items, delete their gift
/// list (items and reservations on them cascade), delete the
/// membership.
///
/// # Errors
///
/// Returns an error if the membership does not exist or a database
/// operation fails.
pub fn leave_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        repair_assignments_on_departure(conn, event_id, user_id)?;

        let item_ids: Vec<i64> = queries::gifts::event_item_ids(conn, event_id)?;
        diesel::delete(reservations::table)
            .filter(reservations::by_user_id.eq(user_id))
            .filter(reservations::item_id.eq_any(&item_ids))
            .execute(conn)?;

        diesel::delete(gift_lists::table)
            .filter(gift_lists::event_id.eq(event_id))
            .filter(gift_lists::owner_id.eq(user_id))
            .execute(conn)?;

        let rows: usize = diesel::delete(event_members::table)
            .filter(event_members::event_id.eq(event_id))
            .filter(event_members::user_id.eq(user_id))
            .execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::MembershipNotFound { event_id, user_id });
        }

        info!(event_id, user_id, "Member left event");
        Ok(())
    })
}

/// An organizer removes a member from an event.
///
/// Same shape as [`leave_event`], except the removed member's active
/// reservations are released rather than deleted.
///
/// # Errors
///
/// Returns an error if the membership does not exist or a database
/// operation fails.
pub fn remove_member(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        repair_assignments_on_departure(conn, event_id, user_id)?;

        let item_ids: Vec<i64> = queries::gifts::event_item_ids(conn, event_id)?;
        diesel::update(reservations::table)
            .filter(reservations::by_user_id.eq(user_id))
            .filter(reservations::item_id.eq_any(&item_ids))
            .filter(reservations::status.eq(ReservationStatus::Active.as_str()))
            .set(reservations::status.eq(ReservationStatus::Released.as_str()))
            .execute(conn)?;

        diesel::delete(gift_lists::table)
            .filter(gift_lists::event_id.eq(event_id))
            .filter(gift_lists::owner_id.eq(user_id))
            .execute(conn)?;

        let rows: usize = diesel::delete(event_members::table)
            .filter(event_members::event_id.eq(event_id))
            .filter(event_members::user_id.eq(user_id))
            .execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::MembershipNotFound { event_id, user_id });
        }

        info!(event_id, user_id, "Removed member from event");
        Ok(())
    })
}
