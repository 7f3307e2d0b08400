// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested user was not found.
    UserNotFound(i64),
    /// The requested event was not found.
    EventNotFound(i64),
    /// The requested gift item was not found.
    GiftItemNotFound(i64),
    /// The user has no membership in the event.
    MembershipNotFound { event_id: i64, user_id: i64 },
    /// The gift item already carries an active reservation.
    AlreadyReserved { item_id: i64 },
    /// A stored assignment set violated the bijection invariants.
    InvariantViolation(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UserNotFound(id) => write!(f, "User not found: {id}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::GiftItemNotFound(id) => write!(f, "Gift item not found: {id}"),
            Self::MembershipNotFound { event_id, user_id } => {
                write!(f, "User {user_id} is not a member of event {event_id}")
            }
            Self::AlreadyReserved { item_id } => {
                write!(f, "Gift item {item_id} is already reserved")
            }
            Self::InvariantViolation(msg) => write!(f, "Assignment invariant violation: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
