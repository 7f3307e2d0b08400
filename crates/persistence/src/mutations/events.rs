// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use nalka_domain::{EventRules, MemberRole};
use tracing::info;

use crate::diesel_schema::{event_members, events, gift_lists};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates an event with its owner membership and the owner's gift
/// list, in one transaction.
///
/// Rule flags are normalized before storage: a Secret Santa event
/// always gets no-spoil and anonymous reservations.
///
/// # Errors
///
/// Returns an error if the database operation fails (including a slug
/// collision).
#[allow(clippy::too_many_arguments)]
pub fn create_event(
    conn: &mut SqliteConnection,
    owner_id: i64,
    slug: &str,
    title: &str,
    description: Option<&str>,
    location: Option<&str>,
    event_on: Option<&str>,
    rules: &EventRules,
    owner_list_title: &str,
) -> Result<i64, PersistenceError> {
    let rules: EventRules = rules.normalized();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(events::table)
            .values((
                events::slug.eq(slug),
                events::title.eq(title),
                events::description.eq(description),
                events::location.eq(location),
                events::event_on.eq(event_on),
                events::owner_id.eq(owner_id),
                events::is_secret_santa.eq(i32::from(rules.is_secret_santa)),
                events::is_no_spoil.eq(i32::from(rules.is_no_spoil)),
                events::is_anon_reservations.eq(i32::from(rules.is_anon_reservations)),
                events::is_second_hand_ok.eq(i32::from(rules.is_second_hand_ok)),
                events::is_handmade_ok.eq(i32::from(rules.is_handmade_ok)),
                events::budget_cap_cents.eq(rules.budget_cap_cents),
            ))
            .execute(conn)?;
        let event_id: i64 = get_last_insert_rowid(conn)?;

        diesel::insert_into(event_members::table)
            .values((
                event_members::event_id.eq(event_id),
                event_members::user_id.eq(owner_id),
                event_members::role.eq(MemberRole::Owner.as_str()),
            ))
            .execute(conn)?;

        diesel::insert_into(gift_lists::table)
            .values((
                gift_lists::event_id.eq(event_id),
                gift_lists::owner_id.eq(owner_id),
                gift_lists::title.eq(owner_list_title),
            ))
            .execute(conn)?;

        info!(event_id, owner_id, slug, "Created event");
        Ok(event_id)
    })
}

/// Updates an event's descriptive fields and rule flags.
///
/// # Errors
///
/// Returns an error if the event does not exist or the update fails.
#[allow(clippy::too_many_arguments)]
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    title: &str,
    description: Option<&str>,
    location: Option<&str>,
    event_on: Option<&str>,
    rules: &EventRules,
) -> Result<(), PersistenceError> {
    let rules: EventRules = rules.normalized();

    let rows: usize = diesel::update(events::table)
        .filter(events::event_id.eq(event_id))
        .set((
            events::title.eq(title),
            events::description.eq(description),
            events::location.eq(location),
            events::event_on.eq(event_on),
            events::is_secret_santa.eq(i32::from(rules.is_secret_santa)),
            events::is_no_spoil.eq(i32::from(rules.is_no_spoil)),
            events::is_anon_reservations.eq(i32::from(rules.is_anon_reservations)),
            events::is_second_hand_ok.eq(i32::from(rules.is_second_hand_ok)),
            events::is_handmade_ok.eq(i32::from(rules.is_handmade_ok)),
            events::budget_cap_cents.eq(rules.budget_cap_cents),
        ))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }
    Ok(())
}

/// Deletes an event. Memberships, lists, items, reservations, and
/// assignments follow by cascade.
///
/// # Errors
///
/// Returns an error if the event does not exist or the delete fails.
pub fn delete_event(conn: &mut SqliteConnection, event_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(events::table)
        .filter(events::event_id.eq(event_id))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }
    info!(event_id, "Deleted event");
    Ok(())
}
