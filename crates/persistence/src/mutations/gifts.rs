// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use nalka_domain::ReservationStatus;
use tracing::debug;

use crate::diesel_schema::{gift_items, reservations};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Adds an item to a gift list.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn add_gift_item(
    conn: &mut SqliteConnection,
    list_id: i64,
    title: &str,
    url: Option<&str>,
    note: Option<&str>,
    price_cents: Option<i64>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(gift_items::table)
        .values((
            gift_items::list_id.eq(list_id),
            gift_items::title.eq(title),
            gift_items::url.eq(url),
            gift_items::note.eq(note),
            gift_items::price_cents.eq(price_cents),
        ))
        .execute(conn)?;
    let item_id: i64 = get_last_insert_rowid(conn)?;
    debug!(list_id, item_id, "Added gift item");
    Ok(item_id)
}

/// Deletes a gift item and its reservations, in one transaction.
///
/// # Errors
///
/// Returns an error if the item does not exist or the delete fails.
pub fn delete_gift_item(conn: &mut SqliteConnection, item_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(reservations::table)
            .filter(reservations::item_id.eq(item_id))
            .execute(conn)?;
        let rows: usize = diesel::delete(gift_items::table)
            .filter(gift_items::item_id.eq(item_id))
            .execute(conn)?;
        if rows == 0 {
            return Err(PersistenceError::GiftItemNotFound(item_id));
        }
        Ok(())
    })
}

/// Reserves a gift item for a user.
///
/// At most one active reservation per item: the check and the insert
/// share a transaction.
///
/// # Errors
///
/// Returns [`PersistenceError::AlreadyReserved`] if the item already
/// carries an active reservation, or an error if the database
/// operation fails.
pub fn reserve_item(
    conn: &mut SqliteConnection,
    item_id: i64,
    by_user_id: i64,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::gifts::active_reservation(conn, item_id)?.is_some() {
            return Err(PersistenceError::AlreadyReserved { item_id });
        }
        diesel::insert_into(reservations::table)
            .values((
                reservations::item_id.eq(item_id),
                reservations::by_user_id.eq(by_user_id),
                reservations::status.eq(ReservationStatus::Active.as_str()),
            ))
            .execute(conn)?;
        let reservation_id: i64 = get_last_insert_rowid(conn)?;
        debug!(item_id, by_user_id, reservation_id, "Reserved gift item");
        Ok(reservation_id)
    })
}

/// Releases a user's active reservation on an item.
///
/// # Errors
///
/// Returns an error if no active reservation by this user exists, or
/// if the database operation fails.
pub fn release_reservation(
    conn: &mut SqliteConnection,
    item_id: i64,
    by_user_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(reservations::table)
        .filter(reservations::item_id.eq(item_id))
        .filter(reservations::by_user_id.eq(by_user_id))
        .filter(reservations::status.eq(ReservationStatus::Active.as_str()))
        .set(reservations::status.eq(ReservationStatus::Released.as_str()))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No active reservation on item {item_id} by user {by_user_id}"
        )));
    }
    Ok(())
}
