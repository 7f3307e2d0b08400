// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application layer for Nalka.
//!
//! Sits between the HTTP server and the persistence adapter: session
//! authentication, role-based authorization, request validation, rate
//! limiting, and one handler function per endpoint. Handlers return
//! [`ApiError`], which the server maps onto HTTP statuses.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod permissions;
mod rate_limit;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, CurrentUser};
pub use error::ApiError;
pub use handlers::{
    add_gift, create_event, delete_account, delete_event, delete_gift, get_event, invite_member,
    launch_draw, launch_draw_with_rng, leave_event, list_my_events, my_assignment, release_gift,
    remove_member, reserve_gift, update_event, update_profile,
};
pub use permissions::AuthorizationService;
pub use request_response::{
    AddGiftRequest, CreateEventRequest, DrawResponse, EventDetail, EventSummary, GiftItemInfo,
    InviteRequest, InviteResponse, LoginRequest, LoginTokenResponse, MemberInfo,
    MyAssignmentResponse, SessionResponse, TokenLoginRequest, UpdateEventRequest,
    UpdateProfileRequest, UserInfo,
};
