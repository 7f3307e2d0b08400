// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use nalka_domain::ReservationStatus;

use crate::data_models::{GiftItemData, GiftListData, ReservationData};
use crate::diesel_schema::{gift_items, gift_lists, reservations};
use crate::error::PersistenceError;

/// Retrieves a user's gift list for an event.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn gift_list_for(
    conn: &mut SqliteConnection,
    event_id: i64,
    owner_id: i64,
) -> Result<Option<GiftListData>, PersistenceError> {
    Ok(gift_lists::table
        .filter(gift_lists::event_id.eq(event_id))
        .filter(gift_lists::owner_id.eq(owner_id))
        .first::<GiftListData>(conn)
        .optional()?)
}

/// Retrieves a gift item together with the list it belongs to.
///
/// The list carries the event and owner IDs the authorization layer
/// needs before touching the item.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_gift_item_with_list(
    conn: &mut SqliteConnection,
    item_id: i64,
) -> Result<Option<(GiftItemData, GiftListData)>, PersistenceError> {
    Ok(gift_items::table
        .inner_join(gift_lists::table)
        .filter(gift_items::item_id.eq(item_id))
        .select((gift_items::all_columns, gift_lists::all_columns))
        .first::<(GiftItemData, GiftListData)>(conn)
        .optional()?)
}

/// Lists the items of a gift list, newest first, capped at `limit`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_items(
    conn: &mut SqliteConnection,
    list_id: i64,
    limit: i64,
) -> Result<Vec<GiftItemData>, PersistenceError> {
    Ok(gift_items::table
        .filter(gift_items::list_id.eq(list_id))
        .order((gift_items::created_at.desc(), gift_items::item_id.desc()))
        .limit(limit)
        .load::<GiftItemData>(conn)?)
}

/// IDs of every gift item that belongs to an event, across all lists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn event_item_ids(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(gift_items::table
        .inner_join(gift_lists::table)
        .filter(gift_lists::event_id.eq(event_id))
        .select(gift_items::item_id)
        .load::<i64>(conn)?)
}

/// Retrieves the active reservation on an item, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn active_reservation(
    conn: &mut SqliteConnection,
    item_id: i64,
) -> Result<Option<ReservationData>, PersistenceError> {
    Ok(reservations::table
        .filter(reservations::item_id.eq(item_id))
        .filter(reservations::status.eq(ReservationStatus::Active.as_str()))
        .first::<ReservationData>(conn)
        .optional()?)
}
