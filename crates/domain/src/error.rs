// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The email address is syntactically invalid.
    InvalidEmail(String),
    /// An event title failed validation.
    InvalidEventTitle(String),
    /// A gift item title failed validation.
    InvalidGiftTitle(String),
    /// A budget amount could not be parsed.
    InvalidBudget(String),
    /// An unknown member role string was encountered.
    InvalidRole(String),
    /// An unknown reservation status string was encountered.
    InvalidReservationStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email address: {msg}"),
            Self::InvalidEventTitle(msg) => write!(f, "Invalid event title: {msg}"),
            Self::InvalidGiftTitle(msg) => write!(f, "Invalid gift title: {msg}"),
            Self::InvalidBudget(msg) => write!(f, "Invalid budget amount: {msg}"),
            Self::InvalidRole(value) => write!(f, "Unknown member role: {value}"),
            Self::InvalidReservationStatus(value) => {
                write!(f, "Unknown reservation status: {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
