// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nalka_domain::EventRules;

use crate::PersistenceError;
use crate::tests::{secret_santa_rules, setup_event, test_db};

#[test]
fn test_upsert_user_is_idempotent() {
    let mut persistence = test_db();
    let first = persistence
        .upsert_user("alice@example.com", Some("Alice"))
        .unwrap();
    let second = persistence.upsert_user("alice@example.com", None).unwrap();
    assert_eq!(first, second);

    let user = persistence
        .get_user_by_email("alice@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(user.name.as_deref(), Some("Alice"));
}

#[test]
fn test_update_user_name() {
    let mut persistence = test_db();
    let user_id = persistence.upsert_user("bob@example.com", None).unwrap();

    persistence.update_user_name(user_id, Some("Bob")).unwrap();
    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.name.as_deref(), Some("Bob"));

    assert_eq!(
        persistence.update_user_name(9999, Some("Nobody")),
        Err(PersistenceError::UserNotFound(9999))
    );
}

#[test]
fn test_create_event_seeds_owner_membership_and_list() {
    let mut persistence = test_db();
    let (event_id, members) = setup_event(&mut persistence, 1);

    assert_eq!(
        persistence
            .membership_role(event_id, members[0])
            .unwrap()
            .as_deref(),
        Some("OWNER")
    );
    assert!(
        persistence
            .gift_list_for(event_id, members[0])
            .unwrap()
            .is_some()
    );

    let event = persistence
        .get_event_by_slug("christmas-2026")
        .unwrap()
        .unwrap();
    assert_eq!(event.event_id, event_id);
    assert_eq!(event.owner_id, members[0]);
}

#[test]
fn test_secret_santa_rules_are_normalized_on_write() {
    let mut persistence = test_db();
    let (event_id, _) = setup_event(&mut persistence, 1);

    // setup_event submits secret-santa with the spoiler flags off; the
    // stored row must have them forced on.
    let event = persistence.get_event_by_id(event_id).unwrap().unwrap();
    assert_eq!(event.is_secret_santa, 1);
    assert_eq!(event.is_no_spoil, 1);
    assert_eq!(event.is_anon_reservations, 1);
}

#[test]
fn test_update_event_rewrites_fields_and_rules() {
    let mut persistence = test_db();
    let (event_id, _) = setup_event(&mut persistence, 1);

    let rules = EventRules {
        is_second_hand_ok: true,
        budget_cap_cents: Some(2500),
        ..EventRules::default()
    };
    persistence
        .update_event(
            event_id,
            "New Year 2027",
            Some("Fresh start"),
            Some("Lyon"),
            Some("2027-01-01"),
            &rules,
        )
        .unwrap();

    let event = persistence.get_event_by_id(event_id).unwrap().unwrap();
    assert_eq!(event.title, "New Year 2027");
    assert_eq!(event.location.as_deref(), Some("Lyon"));
    assert_eq!(event.is_secret_santa, 0);
    assert_eq!(event.is_second_hand_ok, 1);
    assert_eq!(event.budget_cap_cents, Some(2500));

    assert_eq!(
        persistence.update_event(9999, "X", None, None, None, &rules),
        Err(PersistenceError::EventNotFound(9999))
    );
}

#[test]
fn test_invite_is_idempotent() {
    let mut persistence = test_db();
    let (event_id, _) = setup_event(&mut persistence, 2);

    let first = persistence
        .invite_member(event_id, "member1@example.com", "Another title")
        .unwrap();
    let members = persistence.list_members(event_id).unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|m| m.user_id == first));
}

#[test]
fn test_list_events_for_user() {
    let mut persistence = test_db();
    let (event_a, members) = setup_event(&mut persistence, 2);
    let event_b = persistence
        .create_event(
            members[1],
            "birthday",
            "Birthday",
            None,
            None,
            None,
            &secret_santa_rules(),
            "My list",
        )
        .unwrap();

    let for_owner: Vec<i64> = persistence
        .list_events_for_user(members[0])
        .unwrap()
        .iter()
        .map(|e| e.event_id)
        .collect();
    assert_eq!(for_owner, vec![event_a]);

    let for_member: Vec<i64> = persistence
        .list_events_for_user(members[1])
        .unwrap()
        .iter()
        .map(|e| e.event_id)
        .collect();
    assert_eq!(for_member.len(), 2);
    assert!(for_member.contains(&event_b));
}

#[test]
fn test_reserve_is_exclusive_until_released() {
    let mut persistence = test_db();
    let (event_id, members) = setup_event(&mut persistence, 3);
    let list = persistence
        .gift_list_for(event_id, members[0])
        .unwrap()
        .unwrap();
    let item_id = persistence
        .add_gift_item(list.list_id, "Teapot", None, None, Some(3000))
        .unwrap();

    persistence.reserve_item(item_id, members[1]).unwrap();
    assert_eq!(
        persistence.reserve_item(item_id, members[2]),
        Err(PersistenceError::AlreadyReserved { item_id })
    );

    persistence.release_reservation(item_id, members[1]).unwrap();
    persistence.reserve_item(item_id, members[2]).unwrap();
}

#[test]
fn test_release_requires_an_active_reservation() {
    let mut persistence = test_db();
    let (event_id, members) = setup_event(&mut persistence, 2);
    let list = persistence
        .gift_list_for(event_id, members[0])
        .unwrap()
        .unwrap();
    let item_id = persistence
        .add_gift_item(list.list_id, "Scarf", None, None, None)
        .unwrap();

    assert!(matches!(
        persistence.release_reservation(item_id, members[1]),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_delete_gift_item_takes_reservations_with_it() {
    let mut persistence = test_db();
    let (event_id, members) = setup_event(&mut persistence, 2);
    let list = persistence
        .gift_list_for(event_id, members[0])
        .unwrap()
        .unwrap();
    let item_id = persistence
        .add_gift_item(list.list_id, "Puzzle", None, None, None)
        .unwrap();
    persistence.reserve_item(item_id, members[1]).unwrap();

    persistence.delete_gift_item(item_id).unwrap();

    assert!(
        persistence
            .get_gift_item_with_list(item_id)
            .unwrap()
            .is_none()
    );
    assert_eq!(
        persistence.delete_gift_item(item_id),
        Err(PersistenceError::GiftItemNotFound(item_id))
    );
}

#[test]
fn test_list_items_caps_and_orders_newest_first() {
    let mut persistence = test_db();
    let (event_id, members) = setup_event(&mut persistence, 1);
    let list = persistence
        .gift_list_for(event_id, members[0])
        .unwrap()
        .unwrap();

    let mut ids: Vec<i64> = Vec::new();
    for i in 0..10 {
        let title = format!("Item {i}");
        ids.push(
            persistence
                .add_gift_item(list.list_id, &title, None, None, None)
                .unwrap(),
        );
    }

    let items = persistence.list_items(list.list_id, 8).unwrap();
    assert_eq!(items.len(), 8);
    // Inserted in the same second, so the ID tie-break decides.
    assert_eq!(items[0].item_id, ids[9]);
    assert_eq!(items[7].item_id, ids[2]);
}
