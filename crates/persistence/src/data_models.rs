// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs returned by the query layer.
//!
//! Field order matches the column order declared in `diesel_schema`, as
//! Diesel maps tuples to these structs positionally.

use diesel::prelude::*;

/// An account row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct UserData {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: String,
}

/// An event row, rule flags stored as 0/1 integers.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct EventData {
    pub event_id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_on: Option<String>,
    pub owner_id: i64,
    pub is_secret_santa: i32,
    pub is_no_spoil: i32,
    pub is_anon_reservations: i32,
    pub is_second_hand_ok: i32,
    pub is_handmade_ok: i32,
    pub budget_cap_cents: Option<i64>,
    pub created_at: String,
}

/// A membership row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct MembershipData {
    pub membership_id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub role: String,
    pub created_at: String,
}

/// A member of an event joined with their account fields.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct MemberData {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub joined_at: String,
}

/// A gift list row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct GiftListData {
    pub list_id: i64,
    pub event_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub created_at: String,
}

/// A gift item row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct GiftItemData {
    pub item_id: i64,
    pub list_id: i64,
    pub title: String,
    pub url: Option<String>,
    pub note: Option<String>,
    pub price_cents: Option<i64>,
    pub created_at: String,
}

/// A reservation row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct ReservationData {
    pub reservation_id: i64,
    pub item_id: i64,
    pub by_user_id: i64,
    pub status: String,
    pub created_at: String,
}

/// A Secret Santa edge row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct AssignmentData {
    pub assignment_id: i64,
    pub event_id: i64,
    pub giver_id: i64,
    pub receiver_id: i64,
}

/// A session row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A passwordless login token row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct LoginTokenData {
    pub token_id: i64,
    pub token: String,
    pub email: String,
    pub created_at: String,
    pub expires_at: String,
    pub consumed: i32,
}
