// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response payloads for the JSON API.

use nalka_domain::EventRules;
use serde::{Deserialize, Serialize};

/// Request body for requesting a passwordless login token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Response carrying a freshly issued login token.
///
/// Handing the token back to the caller is the mail-delivery boundary;
/// transporting it to the user's inbox happens outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginTokenResponse {
    pub token: String,
}

/// Request body for trading a login token for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLoginRequest {
    pub token: String,
}

/// Public account fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_token: String,
    pub user: UserInfo,
}

/// Request body for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_on: Option<String>,
    #[serde(default)]
    pub rules: EventRules,
}

/// Request body for updating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_on: Option<String>,
    #[serde(default)]
    pub rules: EventRules,
}

/// Request body for inviting a member by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteRequest {
    pub email: String,
}

/// Response to an invite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub user_id: i64,
}

/// A member as shown to other members of the same event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

/// An event in the caller's event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub slug: String,
    pub title: String,
    pub event_on: Option<String>,
    pub is_secret_santa: bool,
}

/// Full event view for members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetail {
    pub event_id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_on: Option<String>,
    pub owner_id: i64,
    pub rules: EventRules,
    pub members: Vec<MemberInfo>,
    /// Whether a Secret Santa draw currently exists. Who gives to whom
    /// is never part of this view.
    pub drawn: bool,
}

/// Request body for adding a gift item to the caller's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGiftRequest {
    pub event_slug: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Price in euros, decimal comma tolerated.
    #[serde(default)]
    pub price: Option<String>,
}

/// A gift item as shown to members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftItemInfo {
    pub item_id: i64,
    pub title: String,
    pub url: Option<String>,
    pub note: Option<String>,
    pub price_cents: Option<i64>,
}

/// Response to launching a draw. Deliberately spoiler-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResponse {
    pub participants: usize,
}

/// The caller's own Secret Santa assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyAssignmentResponse {
    pub receiver: UserInfo,
    /// The newest few items from the receiver's wishlist.
    pub items: Vec<GiftItemInfo>,
}

/// Request body for updating the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
}
