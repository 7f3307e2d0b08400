// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role a user holds within a single event.
///
/// Roles are scoped per event membership; the same user may be `Owner`
/// of one event and `Member` of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MemberRole {
    /// Event creator. Full authority, cannot leave or be removed.
    Owner,
    /// Delegated organizer. May invite, launch draws, and remove members.
    Admin,
    /// Regular participant.
    #[default]
    Member,
}

impl FromStr for MemberRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Self::Owner),
            "ADMIN" => Ok(Self::Admin),
            "MEMBER" => Ok(Self::Member),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MemberRole {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }

    /// Returns whether this role may manage the event: edit its details,
    /// invite members, and launch or relaunch the Secret Santa draw.
    #[must_use]
    pub const fn can_manage_event(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Returns whether this role may remove a member holding `target`.
    ///
    /// Admins may only remove regular members. Owners may remove anyone;
    /// the owner-cannot-remove-self rule is enforced where the identities
    /// are known, not here.
    #[must_use]
    pub const fn can_remove(&self, target: Self) -> bool {
        match self {
            Self::Owner => true,
            Self::Admin => matches!(target, Self::Member),
            Self::Member => false,
        }
    }

    /// Returns whether this role may leave the event on its own.
    ///
    /// Owners cannot leave; they must delete the event or transfer it.
    #[must_use]
    pub const fn can_leave(&self) -> bool {
        !matches!(self, Self::Owner)
    }
}
