// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API-level errors and the translations from the inner layers.
//!
//! The inner crates keep their own error enums; everything crossing the
//! API boundary is translated here so the server can map each variant
//! to one HTTP status.

use nalka::CoreError;
use nalka_domain::DomainError;
use nalka_persistence::PersistenceError;

/// Errors surfaced to API callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A request field failed validation.
    Validation(String),
    /// The caller is not authenticated (missing, invalid, or expired
    /// credentials).
    Unauthenticated(String),
    /// The caller is authenticated but not allowed to do this.
    Forbidden(String),
    /// The requested resource does not exist (or is hidden from the
    /// caller, which must look the same).
    NotFound(String),
    /// The request conflicts with current state.
    Conflict(String),
    /// The caller exceeded a rate limit.
    RateLimited {
        /// The limiter bucket that tripped.
        key: String,
    },
    /// A draw was launched with fewer than two participants.
    NotEnoughParticipants(usize),
    /// The draw generator exhausted its retry budget.
    DrawImpossible,
    /// An unexpected internal failure.
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation failed: {msg}"),
            Self::Unauthenticated(msg) => write!(f, "Authentication required: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::RateLimited { key } => write!(f, "Rate limit exceeded for {key}"),
            Self::NotEnoughParticipants(count) => {
                write!(f, "At least 2 participants required, got {count}")
            }
            Self::DrawImpossible => write!(f, "Draw impossible, try again"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotEnoughParticipants(count) => Self::NotEnoughParticipants(count),
            CoreError::SelfPairingRemained | CoreError::DrawExhausted { .. } => {
                Self::DrawImpossible
            }
            CoreError::InvalidAssignmentSet(msg) => Self::Internal(msg),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UserNotFound(id) => Self::NotFound(format!("User {id}")),
            PersistenceError::EventNotFound(id) => Self::NotFound(format!("Event {id}")),
            PersistenceError::GiftItemNotFound(id) => Self::NotFound(format!("Gift item {id}")),
            PersistenceError::MembershipNotFound { event_id, user_id } => {
                Self::NotFound(format!("Membership of user {user_id} in event {event_id}"))
            }
            PersistenceError::NotFound(msg) => Self::NotFound(msg),
            PersistenceError::AlreadyReserved { item_id } => {
                Self::Conflict(format!("Gift item {item_id} is already reserved"))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
