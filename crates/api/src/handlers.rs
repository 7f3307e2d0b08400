// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API operations, one function per endpoint.
//!
//! Every function takes the persistence adapter and the authenticated
//! caller, checks authorization against the caller's membership role,
//! and translates rows into response payloads. The HTTP layer above
//! only extracts arguments and maps [`ApiError`] variants to statuses.

use rand::Rng;
use time::Duration;
use tracing::info;

use nalka::{Assignment, MAX_DRAW_ATTEMPTS, draw_with_retries};
use nalka_domain::{
    EventRules, MemberRole, normalize_url, parse_budget_cents, slugify, validate_email,
    validate_event_title, validate_gift_title,
};
use nalka_persistence::{EventData, GiftItemData, Persistence, UserData};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::permissions::AuthorizationService;
use crate::rate_limit;
use crate::request_response::{
    AddGiftRequest, CreateEventRequest, DrawResponse, EventDetail, EventSummary, GiftItemInfo,
    InviteResponse, MemberInfo, MyAssignmentResponse, UpdateEventRequest, UpdateProfileRequest,
    UserInfo,
};

/// How many wishlist items the assignment view shows.
const MAX_ASSIGNMENT_ITEMS: i64 = 8;

/// Window for all invite rate limits.
const INVITE_WINDOW: Duration = Duration::hours(1);
/// Invites allowed per client address per window.
const INVITES_PER_IP: i64 = 30;
/// Invites allowed per inviting account per window.
const INVITES_PER_USER: i64 = 20;
/// Invites allowed into one event per window.
const INVITES_PER_EVENT: i64 = 50;
/// Invites allowed towards one email address per window, across all
/// events. Keeps the invite flow from becoming a mail cannon.
const INVITES_PER_TARGET: i64 = 3;

// ============================================================================
// Events
// ============================================================================

/// Creates an event owned by the caller.
///
/// The slug is derived from the title with a random hex suffix, so two
/// "Christmas" events never collide.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_event(
    persistence: &mut Persistence,
    user: &CurrentUser,
    request: &CreateEventRequest,
) -> Result<EventDetail, ApiError> {
    let title: String = validate_event_title(&request.title)?;
    let slug: String = format!("{}-{:04x}", slugify(&title), rand::random::<u16>());

    let event_id: i64 = persistence.create_event(
        user.user_id,
        &slug,
        &title,
        request.description.as_deref(),
        request.location.as_deref(),
        request.event_on.as_deref(),
        &request.rules,
        &list_title_for(user),
    )?;

    info!(event_id, slug, "Created event");
    let event: EventData = persistence
        .get_event_by_id(event_id)?
        .ok_or_else(|| ApiError::Internal(format!("Event {event_id} vanished after insert")))?;
    event_detail(persistence, &event)
}

/// Lists the caller's events, newest first.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_my_events(
    persistence: &mut Persistence,
    user: &CurrentUser,
) -> Result<Vec<EventSummary>, ApiError> {
    let events: Vec<EventData> = persistence.list_events_for_user(user.user_id)?;
    Ok(events
        .iter()
        .map(|event| EventSummary {
            slug: event.slug.clone(),
            title: event.title.clone(),
            event_on: event.event_on.clone(),
            is_secret_santa: event.is_secret_santa != 0,
        })
        .collect())
}

/// Returns the full event view for a member.
///
/// # Errors
///
/// Returns `NotFound` for unknown slugs and for events the caller is
/// not a member of, or an error if persistence fails.
pub fn get_event(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
) -> Result<EventDetail, ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    event_detail(persistence, &event)
}

/// Updates an event's descriptive fields and rules. Organizers only.
///
/// # Errors
///
/// Returns an error if the caller lacks authority, validation fails,
/// or persistence fails.
pub fn update_event(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
    request: &UpdateEventRequest,
) -> Result<EventDetail, ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    let role: MemberRole =
        AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    AuthorizationService::require_manager(role, "update event")?;

    let title: String = validate_event_title(&request.title)?;
    persistence.update_event(
        event.event_id,
        &title,
        request.description.as_deref(),
        request.location.as_deref(),
        request.event_on.as_deref(),
        &request.rules,
    )?;

    let updated: EventData = persistence.get_event_by_id(event.event_id)?.ok_or_else(|| {
        ApiError::Internal(format!("Event {} vanished during update", event.event_id))
    })?;
    event_detail(persistence, &updated)
}

/// Deletes an event. Owner only.
///
/// # Errors
///
/// Returns an error if the caller is not the owner or persistence
/// fails.
pub fn delete_event(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
) -> Result<(), ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    let role: MemberRole =
        AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    AuthorizationService::require_owner(role, "delete event")?;
    persistence.delete_event(event.event_id)?;
    info!(event_id = event.event_id, "Deleted event");
    Ok(())
}

// ============================================================================
// Membership
// ============================================================================

/// Invites a member by email. Organizers only, rate limited on four
/// axes. Idempotent for existing members.
///
/// # Errors
///
/// Returns an error if the caller lacks authority, the email is
/// invalid, a limit trips, or persistence fails.
pub fn invite_member(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
    email: &str,
    client_ip: &str,
) -> Result<InviteResponse, ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    let role: MemberRole =
        AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    AuthorizationService::require_manager(role, "invite member")?;

    let email: String = validate_email(email)?;

    rate_limit::enforce_limit(
        persistence,
        &format!("invite:ip:{client_ip}"),
        INVITES_PER_IP,
        INVITE_WINDOW,
    )?;
    rate_limit::enforce_limit(
        persistence,
        &format!("invite:user:{}", user.user_id),
        INVITES_PER_USER,
        INVITE_WINDOW,
    )?;
    rate_limit::enforce_limit(
        persistence,
        &format!("invite:event:{}", event.event_id),
        INVITES_PER_EVENT,
        INVITE_WINDOW,
    )?;
    rate_limit::enforce_limit(
        persistence,
        &format!("invite:target:{email}"),
        INVITES_PER_TARGET,
        INVITE_WINDOW,
    )?;

    let user_id: i64 =
        persistence.invite_member(event.event_id, &email, &format!("{email}'s wishlist"))?;
    info!(event_id = event.event_id, user_id, "Invited member");
    Ok(InviteResponse { user_id })
}

/// The caller leaves an event. The owner cannot.
///
/// # Errors
///
/// Returns an error if the caller is the owner, is not a member, or
/// persistence fails.
pub fn leave_event(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
) -> Result<(), ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    let role: MemberRole =
        AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    AuthorizationService::authorize_leave(role)?;
    persistence.leave_event(event.event_id, user.user_id)?;
    info!(event_id = event.event_id, user_id = user.user_id, "Member left");
    Ok(())
}

/// Removes another member from an event, outranking them.
///
/// # Errors
///
/// Returns an error if the caller lacks authority over the target, the
/// target is not a member, or persistence fails.
pub fn remove_member(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
    target_user_id: i64,
) -> Result<(), ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    let actor_role: MemberRole =
        AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    let target_role: MemberRole = AuthorizationService::require_member(
        persistence,
        event.event_id,
        target_user_id,
    )
    .map_err(|err| match err {
        ApiError::NotFound(_) => ApiError::NotFound(format!("Member {target_user_id}")),
        other => other,
    })?;
    AuthorizationService::authorize_removal(
        actor_role,
        user.user_id,
        target_role,
        target_user_id,
    )?;
    persistence.remove_member(event.event_id, target_user_id)?;
    info!(
        event_id = event.event_id,
        target_user_id, "Removed member"
    );
    Ok(())
}

// ============================================================================
// Secret Santa
// ============================================================================

/// Launches (or relaunches) the Secret Santa draw with a caller-chosen
/// randomness source.
///
/// The response only says how many participants were drawn; assignments
/// are read one edge at a time via [`my_assignment`].
///
/// # Errors
///
/// Returns an error if the caller lacks authority, the event is not a
/// Secret Santa event, fewer than two participants exist, the draw
/// exhausts its retries, or persistence fails.
pub fn launch_draw_with_rng<R: Rng + ?Sized>(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
    rng: &mut R,
) -> Result<DrawResponse, ApiError> {
    let event: EventData = resolve_event(persistence, slug)?;
    let role: MemberRole =
        AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;
    AuthorizationService::require_manager(role, "launch draw")?;

    if event.is_secret_santa == 0 {
        return Err(ApiError::Conflict(String::from(
            "This event is not a Secret Santa event",
        )));
    }

    let participants: Vec<i64> = persistence.draw_participants(event.event_id)?;
    let edges: Vec<Assignment> = draw_with_retries(&participants, rng, MAX_DRAW_ATTEMPTS)?;
    persistence.replace_assignments(event.event_id, &edges)?;

    info!(
        event_id = event.event_id,
        participants = participants.len(),
        "Launched draw"
    );
    Ok(DrawResponse {
        participants: participants.len(),
    })
}

/// Launches the draw with the thread-local randomness source.
///
/// # Errors
///
/// Same as [`launch_draw_with_rng`].
pub fn launch_draw(
    persistence: &mut Persistence,
    user: &CurrentUser,
    slug: &str,
) -> Result<DrawResponse, ApiError> {
    launch_draw_with_rng(persistence, user, slug, &mut rand::rng())
}

/// Returns the caller's own assignment with a preview of the receiver's
/// wishlist. Never anyone else's edge.
///
/// # Errors
///
/// Returns `NotFound` if the event is unknown, the caller is not a
/// member, or no draw exists, or an error if persistence fails.
pub fn my_assignment(
    persistence: &mut Persistence,
    user: &CurrentUser,
    event_id: i64,
) -> Result<MyAssignmentResponse, ApiError> {
    let event: EventData = persistence
        .get_event_by_id(event_id)?
        .ok_or_else(|| ApiError::NotFound(String::from("Event")))?;
    AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;

    let receiver_id: i64 = persistence
        .my_assignment(event.event_id, user.user_id)?
        .ok_or_else(|| ApiError::NotFound(String::from("No assignment for this event")))?;
    let receiver: UserData = persistence
        .get_user_by_id(receiver_id)?
        .ok_or_else(|| ApiError::Internal(format!("Receiver {receiver_id} has no account")))?;

    let items: Vec<GiftItemInfo> = match persistence.gift_list_for(event.event_id, receiver_id)? {
        Some(list) => persistence
            .list_items(list.list_id, MAX_ASSIGNMENT_ITEMS)?
            .iter()
            .map(gift_item_info)
            .collect(),
        None => Vec::new(),
    };

    Ok(MyAssignmentResponse {
        receiver: user_info(&receiver),
        items,
    })
}

// ============================================================================
// Gifts
// ============================================================================

/// Adds an item to the caller's own wishlist for an event.
///
/// # Errors
///
/// Returns an error if validation fails, the caller is not a member,
/// or persistence fails.
pub fn add_gift(
    persistence: &mut Persistence,
    user: &CurrentUser,
    request: &AddGiftRequest,
) -> Result<GiftItemInfo, ApiError> {
    let event: EventData = resolve_event(persistence, &request.event_slug)?;
    AuthorizationService::require_member(persistence, event.event_id, user.user_id)?;

    let title: String = validate_gift_title(&request.title)?;
    let url: Option<String> = normalize_url(request.url.as_deref());
    let price_cents: Option<i64> = parse_budget_cents(request.price.as_deref())?;

    let list = persistence
        .gift_list_for(event.event_id, user.user_id)?
        .ok_or_else(|| {
            ApiError::Internal(format!(
                "Member {} of event {} has no gift list",
                user.user_id, event.event_id
            ))
        })?;
    let item_id: i64 = persistence.add_gift_item(
        list.list_id,
        &title,
        url.as_deref(),
        request.note.as_deref(),
        price_cents,
    )?;

    Ok(GiftItemInfo {
        item_id,
        title,
        url,
        note: request.note.clone(),
        price_cents,
    })
}

/// Deletes an item from the caller's own wishlist.
///
/// # Errors
///
/// Returns `NotFound` for unknown items, `Forbidden` for items on
/// someone else's list, or an error if persistence fails.
pub fn delete_gift(
    persistence: &mut Persistence,
    user: &CurrentUser,
    item_id: i64,
) -> Result<(), ApiError> {
    let (_, list) = persistence
        .get_gift_item_with_list(item_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Gift item {item_id}")))?;
    if list.owner_id != user.user_id {
        return Err(ApiError::Forbidden(String::from(
            "Only the list owner can delete an item",
        )));
    }
    persistence.delete_gift_item(item_id)?;
    Ok(())
}

/// Reserves a gift item on another member's list.
///
/// # Errors
///
/// Returns `NotFound` for unknown items and non-members, `Forbidden`
/// for the caller's own items, `Conflict` if the item is already
/// reserved, or an error if persistence fails.
pub fn reserve_gift(
    persistence: &mut Persistence,
    user: &CurrentUser,
    item_id: i64,
) -> Result<(), ApiError> {
    let (_, list) = persistence
        .get_gift_item_with_list(item_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Gift item {item_id}")))?;
    AuthorizationService::require_member(persistence, list.event_id, user.user_id)?;
    if list.owner_id == user.user_id {
        return Err(ApiError::Forbidden(String::from(
            "You cannot reserve an item from your own list",
        )));
    }
    persistence.reserve_item(item_id, user.user_id)?;
    Ok(())
}

/// Releases the caller's reservation on a gift item.
///
/// # Errors
///
/// Returns `NotFound` if the item is unknown or the caller holds no
/// active reservation on it, or an error if persistence fails.
pub fn release_gift(
    persistence: &mut Persistence,
    user: &CurrentUser,
    item_id: i64,
) -> Result<(), ApiError> {
    let (_, list) = persistence
        .get_gift_item_with_list(item_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Gift item {item_id}")))?;
    AuthorizationService::require_member(persistence, list.event_id, user.user_id)?;
    persistence.release_reservation(item_id, user.user_id)?;
    Ok(())
}

// ============================================================================
// Account
// ============================================================================

/// Deletes the caller's account, with assignment repair in every event
/// they participate in and deletion of every event they own.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn delete_account(persistence: &mut Persistence, user: &CurrentUser) -> Result<(), ApiError> {
    persistence.delete_account(user.user_id)?;
    info!(user_id = user.user_id, "Deleted account");
    Ok(())
}

/// Updates the caller's display name. A blank name clears it.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn update_profile(
    persistence: &mut Persistence,
    user: &CurrentUser,
    request: &UpdateProfileRequest,
) -> Result<UserInfo, ApiError> {
    let name: Option<&str> = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    persistence.update_user_name(user.user_id, name)?;
    Ok(UserInfo {
        user_id: user.user_id,
        email: user.email.clone(),
        name: name.map(ToString::to_string),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_event(persistence: &mut Persistence, slug: &str) -> Result<EventData, ApiError> {
    persistence
        .get_event_by_slug(slug)?
        .ok_or_else(|| ApiError::NotFound(String::from("Event")))
}

fn event_detail(
    persistence: &mut Persistence,
    event: &EventData,
) -> Result<EventDetail, ApiError> {
    let members: Vec<MemberInfo> = persistence
        .list_members(event.event_id)?
        .into_iter()
        .map(|m| MemberInfo {
            user_id: m.user_id,
            email: m.email,
            name: m.name,
            role: m.role,
        })
        .collect();
    let drawn: bool = !persistence.assignments_for_event(event.event_id)?.is_empty();

    Ok(EventDetail {
        event_id: event.event_id,
        slug: event.slug.clone(),
        title: event.title.clone(),
        description: event.description.clone(),
        location: event.location.clone(),
        event_on: event.event_on.clone(),
        owner_id: event.owner_id,
        rules: event_rules(event),
        members,
        drawn,
    })
}

const fn event_rules(event: &EventData) -> EventRules {
    EventRules {
        is_secret_santa: event.is_secret_santa != 0,
        is_no_spoil: event.is_no_spoil != 0,
        is_anon_reservations: event.is_anon_reservations != 0,
        is_second_hand_ok: event.is_second_hand_ok != 0,
        is_handmade_ok: event.is_handmade_ok != 0,
        budget_cap_cents: event.budget_cap_cents,
    }
}

fn user_info(user: &UserData) -> UserInfo {
    UserInfo {
        user_id: user.user_id,
        email: user.email.clone(),
        name: user.name.clone(),
    }
}

fn gift_item_info(item: &GiftItemData) -> GiftItemInfo {
    GiftItemInfo {
        item_id: item.item_id,
        title: item.title.clone(),
        url: item.url.clone(),
        note: item.note.clone(),
        price_cents: item.price_cents,
    }
}

fn list_title_for(user: &CurrentUser) -> String {
    let label: &str = user.name.as_deref().unwrap_or(&user.email);
    format!("{label}'s wishlist")
}
