// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-event authorization.
//!
//! Roles are stored on the membership row and parsed back into
//! [`MemberRole`]; the rank rules themselves live in the domain crate.
//! Non-members are told "not found" rather than "forbidden" so the
//! existence of an event never leaks.

use std::str::FromStr;

use nalka_domain::MemberRole;
use nalka_persistence::Persistence;

use crate::error::ApiError;

/// Role-based access control over event memberships.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Resolves the caller's role in an event, failing with `NotFound`
    /// for non-members.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the caller is not a member, or an error if
    /// persistence fails.
    pub fn require_member(
        persistence: &mut Persistence,
        event_id: i64,
        user_id: i64,
    ) -> Result<MemberRole, ApiError> {
        let stored: String = persistence
            .membership_role(event_id, user_id)?
            .ok_or_else(|| ApiError::NotFound(String::from("Event")))?;
        Self::parse_role(&stored)
    }

    /// Requires organizer authority (owner or admin).
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the role cannot manage the event.
    pub fn require_manager(role: MemberRole, action: &str) -> Result<(), ApiError> {
        if role.can_manage_event() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("'{action}' requires an organizer role")))
        }
    }

    /// Requires the owner role.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the role is not `Owner`.
    pub fn require_owner(role: MemberRole, action: &str) -> Result<(), ApiError> {
        if role == MemberRole::Owner {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("'{action}' requires the owner role")))
        }
    }

    /// Checks a removal: owners may remove anyone but themselves,
    /// admins only plain members, members nobody.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the removal is not allowed.
    pub fn authorize_removal(
        actor_role: MemberRole,
        actor_id: i64,
        target_role: MemberRole,
        target_id: i64,
    ) -> Result<(), ApiError> {
        if actor_id == target_id {
            return Err(ApiError::Forbidden(String::from(
                "Use leave instead of removing yourself",
            )));
        }
        if actor_role.can_remove(target_role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(String::from(
                "Insufficient role to remove this member",
            )))
        }
    }

    /// Checks a voluntary departure; the owner cannot abandon their
    /// own event.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for the owner.
    pub fn authorize_leave(role: MemberRole) -> Result<(), ApiError> {
        if role.can_leave() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(String::from(
                "The owner cannot leave their own event",
            )))
        }
    }

    fn parse_role(stored: &str) -> Result<MemberRole, ApiError> {
        MemberRole::from_str(stored)
            .map_err(|e| ApiError::Internal(format!("Corrupt role in storage: {e}")))
    }
}
