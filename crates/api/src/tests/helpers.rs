// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use nalka_domain::EventRules;
use nalka_persistence::Persistence;

use crate::auth::CurrentUser;
use crate::handlers;
use crate::request_response::{CreateEventRequest, EventDetail};

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// Creates an account directly, skipping the login-token dance.
pub fn signed_up(persistence: &mut Persistence, email: &str) -> CurrentUser {
    let user_id: i64 = persistence.upsert_user(email, None).unwrap();
    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    CurrentUser {
        user_id: user.user_id,
        email: user.email,
        name: user.name,
    }
}

pub fn secret_santa_rules() -> EventRules {
    EventRules {
        is_secret_santa: true,
        ..EventRules::default()
    }
}

pub fn create_request(title: &str, rules: EventRules) -> CreateEventRequest {
    CreateEventRequest {
        title: String::from(title),
        description: None,
        location: None,
        event_on: Some(String::from("2026-12-24")),
        rules,
    }
}

/// Creates a Secret Santa event and invites `member_count` extra
/// members, seeded straight through persistence so handler rate limits
/// stay untouched. Returns the event and the members' users.
pub fn setup_event(
    persistence: &mut Persistence,
    owner: &CurrentUser,
    member_count: usize,
) -> (EventDetail, Vec<CurrentUser>) {
    let detail: EventDetail =
        handlers::create_event(persistence, owner, &create_request("Christmas", secret_santa_rules()))
            .unwrap();
    let event_id: i64 = detail.event_id;

    let mut members: Vec<CurrentUser> = Vec::new();
    for i in 0..member_count {
        let email: String = format!("member{i}@example.com");
        persistence
            .invite_member(event_id, &email, &format!("{email}'s wishlist"))
            .unwrap();
        members.push(signed_up(persistence, &email));
    }

    let refreshed: EventDetail = handlers::get_event(persistence, owner, &detail.slug).unwrap();
    (refreshed, members)
}
