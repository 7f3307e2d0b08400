// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Per-event gifting rules chosen by the organizers.
///
/// Deserializes leniently: omitted flags default to off, so request
/// bodies only need to name the rules they turn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EventRules {
    /// Whether the event runs a Secret Santa draw.
    pub is_secret_santa: bool,
    /// Whether list owners are kept blind to reservations on their items.
    pub is_no_spoil: bool,
    /// Whether reservations are anonymous to other members.
    pub is_anon_reservations: bool,
    /// Whether second-hand gifts are welcome.
    pub is_second_hand_ok: bool,
    /// Whether handmade gifts are welcome.
    pub is_handmade_ok: bool,
    /// Optional per-gift budget cap, in cents.
    pub budget_cap_cents: Option<i64>,
}

impl EventRules {
    /// Returns these rules with the Secret Santa implications applied.
    ///
    /// A Secret Santa event forces no-spoil and anonymous reservations on,
    /// regardless of what the form submitted; a draw is pointless if the
    /// assignments can be read off the reservation list.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        if self.is_secret_santa {
            self.is_no_spoil = true;
            self.is_anon_reservations = true;
        }
        self
    }
}

/// The lifecycle state of a gift reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReservationStatus {
    /// The reservation is held by a member.
    #[default]
    Active,
    /// The reservation was given back (or its holder was removed).
    Released,
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "RELEASED" => Ok(Self::Released),
            _ => Err(DomainError::InvalidReservationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReservationStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Released => "RELEASED",
        }
    }
}
