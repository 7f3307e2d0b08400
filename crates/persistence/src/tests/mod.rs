// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod auth_tests;
mod crud_tests;

use crate::Persistence;
use nalka::{Assignment, MAX_DRAW_ATTEMPTS, draw_with_retries};
use nalka_domain::EventRules;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn secret_santa_rules() -> EventRules {
    EventRules {
        is_secret_santa: true,
        ..EventRules::default()
    }
}

/// Creates an event with `member_count` members (the owner included),
/// each with their own gift list. Returns the event ID and the member
/// user IDs in join order.
pub fn setup_event(persistence: &mut Persistence, member_count: usize) -> (i64, Vec<i64>) {
    let owner: i64 = persistence
        .upsert_user("owner@example.com", Some("Owner"))
        .unwrap();
    let event_id: i64 = persistence
        .create_event(
            owner,
            "christmas-2026",
            "Christmas 2026",
            None,
            None,
            Some("2026-12-24"),
            &secret_santa_rules(),
            "Owner's list",
        )
        .unwrap();

    let mut members: Vec<i64> = vec![owner];
    for i in 1..member_count {
        let email = format!("member{i}@example.com");
        let list_title = format!("Member {i}'s list");
        let user_id: i64 = persistence
            .invite_member(event_id, &email, &list_title)
            .unwrap();
        members.push(user_id);
    }
    (event_id, members)
}

/// Draws the event's participants with a seeded RNG and persists the
/// result atomically.
pub fn run_draw(persistence: &mut Persistence, event_id: i64, seed: u64) -> Vec<Assignment> {
    let participants: Vec<i64> = persistence.draw_participants(event_id).unwrap();
    let edges: Vec<Assignment> = draw_with_retries(
        &participants,
        &mut StdRng::seed_from_u64(seed),
        MAX_DRAW_ATTEMPTS,
    )
    .unwrap();
    persistence.replace_assignments(event_id, &edges).unwrap();
    edges
}

/// Reads the stored graph back as engine edges.
pub fn stored_edges(persistence: &mut Persistence, event_id: i64) -> Vec<Assignment> {
    persistence
        .assignments_for_event(event_id)
        .unwrap()
        .into_iter()
        .map(|row| Assignment {
            giver_id: row.giver_id,
            receiver_id: row.receiver_id,
        })
        .collect()
}
