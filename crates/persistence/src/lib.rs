// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Nalka.
//!
//! Diesel over `SQLite`, with embedded migrations. The schema stores the
//! Secret Santa assignment graph as one row per giver, which keeps every
//! repair read to a single-row lookup and lets a `UNIQUE` constraint per
//! side back up the bijection invariant.
//!
//! Multi-row lifecycle operations (draw replacement, departures, account
//! deletion) run in single transactions so partial writes are never
//! observable. Tests run against unique in-memory databases.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use nalka::Assignment;
use nalka_domain::EventRules;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    AssignmentData, EventData, GiftItemData, GiftListData, LoginTokenData, MemberData,
    MembershipData, ReservationData, SessionData, UserData,
};
pub use error::PersistenceError;

/// Persistence adapter over a `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database, in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user for a normalized email address, or returns the
    /// existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn upsert_user(
        &mut self,
        email: &str,
        name: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::users::upsert_user(&mut self.conn, email, name)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by normalized email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Updates a user's display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn update_user_name(
        &mut self,
        user_id: i64,
        name: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user_name(&mut self.conn, user_id, name)
    }

    /// Deletes an account: repairs assignments in every event the user
    /// belongs to without owning, deletes events they own, then the
    /// user row. One transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or a database
    /// operation fails.
    pub fn delete_account(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_account(&mut self.conn, user_id)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Creates an event with its owner membership and gift list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    #[allow(clippy::too_many_arguments)]
    pub fn create_event(
        &mut self,
        owner_id: i64,
        slug: &str,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        event_on: Option<&str>,
        rules: &EventRules,
        owner_list_title: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::events::create_event(
            &mut self.conn,
            owner_id,
            slug,
            title,
            description,
            location,
            event_on,
            rules,
            owner_list_title,
        )
    }

    /// Retrieves an event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_event_by_id(
        &mut self,
        event_id: i64,
    ) -> Result<Option<EventData>, PersistenceError> {
        queries::events::get_event_by_id(&mut self.conn, event_id)
    }

    /// Retrieves an event by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_event_by_slug(&mut self, slug: &str) -> Result<Option<EventData>, PersistenceError> {
        queries::events::get_event_by_slug(&mut self.conn, slug)
    }

    /// Lists every event the user is a member of, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_events_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<EventData>, PersistenceError> {
        queries::events::list_events_for_user(&mut self.conn, user_id)
    }

    /// Updates an event's descriptive fields and rule flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or the update fails.
    #[allow(clippy::too_many_arguments)]
    pub fn update_event(
        &mut self,
        event_id: i64,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        event_on: Option<&str>,
        rules: &EventRules,
    ) -> Result<(), PersistenceError> {
        mutations::events::update_event(
            &mut self.conn,
            event_id,
            title,
            description,
            location,
            event_on,
            rules,
        )
    }

    /// Deletes an event with everything attached to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or the delete fails.
    pub fn delete_event(&mut self, event_id: i64) -> Result<(), PersistenceError> {
        mutations::events::delete_event(&mut self.conn, event_id)
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// Retrieves the stored role string for a membership, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn membership_role(
        &mut self,
        event_id: i64,
        user_id: i64,
    ) -> Result<Option<String>, PersistenceError> {
        queries::members::membership_role(&mut self.conn, event_id, user_id)
    }

    /// Lists the members of an event with their account fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_members(&mut self, event_id: i64) -> Result<Vec<MemberData>, PersistenceError> {
        queries::members::list_members(&mut self.conn, event_id)
    }

    /// Adds a user to an event by email, creating the account and their
    /// gift list as needed. Idempotent for existing members.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn invite_member(
        &mut self,
        event_id: i64,
        email: &str,
        list_title: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::members::invite_member(&mut self.conn, event_id, email, list_title)
    }

    /// A member leaves an event: assignment repair, reservation
    /// deletion, list and membership teardown, one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the membership does not exist or a database
    /// operation fails.
    pub fn leave_event(&mut self, event_id: i64, user_id: i64) -> Result<(), PersistenceError> {
        mutations::members::leave_event(&mut self.conn, event_id, user_id)
    }

    /// An organizer removes a member: same as leaving, but the removed
    /// member's active reservations are released, not deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the membership does not exist or a database
    /// operation fails.
    pub fn remove_member(&mut self, event_id: i64, user_id: i64) -> Result<(), PersistenceError> {
        mutations::members::remove_member(&mut self.conn, event_id, user_id)
    }

    // ========================================================================
    // Gift lists, items, reservations
    // ========================================================================

    /// Retrieves a user's gift list for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn gift_list_for(
        &mut self,
        event_id: i64,
        owner_id: i64,
    ) -> Result<Option<GiftListData>, PersistenceError> {
        queries::gifts::gift_list_for(&mut self.conn, event_id, owner_id)
    }

    /// Retrieves a gift item together with the list it belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_gift_item_with_list(
        &mut self,
        item_id: i64,
    ) -> Result<Option<(GiftItemData, GiftListData)>, PersistenceError> {
        queries::gifts::get_gift_item_with_list(&mut self.conn, item_id)
    }

    /// Lists the items of a gift list, newest first, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_items(
        &mut self,
        list_id: i64,
        limit: i64,
    ) -> Result<Vec<GiftItemData>, PersistenceError> {
        queries::gifts::list_items(&mut self.conn, list_id, limit)
    }

    /// Adds an item to a gift list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn add_gift_item(
        &mut self,
        list_id: i64,
        title: &str,
        url: Option<&str>,
        note: Option<&str>,
        price_cents: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        mutations::gifts::add_gift_item(&mut self.conn, list_id, title, url, note, price_cents)
    }

    /// Deletes a gift item and its reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or the delete fails.
    pub fn delete_gift_item(&mut self, item_id: i64) -> Result<(), PersistenceError> {
        mutations::gifts::delete_gift_item(&mut self.conn, item_id)
    }

    /// Retrieves the active reservation on an item, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn active_reservation(
        &mut self,
        item_id: i64,
    ) -> Result<Option<ReservationData>, PersistenceError> {
        queries::gifts::active_reservation(&mut self.conn, item_id)
    }

    /// Reserves a gift item for a user; at most one active reservation
    /// per item.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::AlreadyReserved`] if the item is
    /// taken, or an error if the database operation fails.
    pub fn reserve_item(&mut self, item_id: i64, by_user_id: i64) -> Result<i64, PersistenceError> {
        mutations::gifts::reserve_item(&mut self.conn, item_id, by_user_id)
    }

    /// Releases a user's active reservation on an item.
    ///
    /// # Errors
    ///
    /// Returns an error if no active reservation by this user exists,
    /// or if the database operation fails.
    pub fn release_reservation(
        &mut self,
        item_id: i64,
        by_user_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::gifts::release_reservation(&mut self.conn, item_id, by_user_id)
    }

    // ========================================================================
    // Secret Santa draw
    // ========================================================================

    /// The draw population: distinct gift-list owners of the event,
    /// ordered by list creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn draw_participants(&mut self, event_id: i64) -> Result<Vec<i64>, PersistenceError> {
        queries::assignments::draw_participants(&mut self.conn, event_id)
    }

    /// Replaces an event's assignment graph atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn replace_assignments(
        &mut self,
        event_id: i64,
        edges: &[Assignment],
    ) -> Result<(), PersistenceError> {
        mutations::draw::replace_assignments(&mut self.conn, event_id, edges)
    }

    /// The receiver the given user gives to in this event, if drawn.
    ///
    /// This is the only assignment read exposed per user; nothing here
    /// returns anyone else's edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn my_assignment(
        &mut self,
        event_id: i64,
        giver_id: i64,
    ) -> Result<Option<i64>, PersistenceError> {
        queries::assignments::outgoing_assignment(&mut self.conn, event_id, giver_id)
    }

    /// Every edge of an event's assignment graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn assignments_for_event(
        &mut self,
        event_id: i64,
    ) -> Result<Vec<AssignmentData>, PersistenceError> {
        queries::assignments::assignments_for_event(&mut self.conn, event_id)
    }

    // ========================================================================
    // Sessions, login tokens, rate limiting
    // ========================================================================

    /// Creates a session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn)
    }

    /// Stores a login token for an email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn create_login_token(
        &mut self,
        token: &str,
        email: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_login_token(&mut self.conn, token, email, expires_at)
    }

    /// Retrieves a login token row by token value, consumed or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_login_token(
        &mut self,
        token: &str,
    ) -> Result<Option<LoginTokenData>, PersistenceError> {
        queries::sessions::get_login_token(&mut self.conn, token)
    }

    /// Consumes a login token, returning the email it was issued for,
    /// or `None` when the token is unknown, consumed, or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn consume_login_token(&mut self, token: &str) -> Result<Option<String>, PersistenceError> {
        mutations::sessions::consume_login_token(&mut self.conn, token)
    }

    /// Records a rate-limit hit for a key and returns how many hits the
    /// key already had inside the window starting at `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn record_rate_limit_hit(
        &mut self,
        key: &str,
        since: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::record_rate_limit_hit(&mut self.conn, key, since)
    }
}
