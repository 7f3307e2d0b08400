// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EventRules, ReservationStatus};
use std::str::FromStr;

#[test]
fn test_secret_santa_forces_no_spoil_and_anonymity() {
    let rules: EventRules = EventRules {
        is_secret_santa: true,
        is_no_spoil: false,
        is_anon_reservations: false,
        ..EventRules::default()
    }
    .normalized();

    assert!(rules.is_no_spoil);
    assert!(rules.is_anon_reservations);
}

#[test]
fn test_plain_event_rules_pass_through() {
    let rules: EventRules = EventRules {
        is_secret_santa: false,
        is_no_spoil: false,
        is_anon_reservations: true,
        is_second_hand_ok: true,
        is_handmade_ok: false,
        budget_cap_cents: Some(2500),
    }
    .normalized();

    assert!(!rules.is_no_spoil);
    assert!(rules.is_anon_reservations);
    assert_eq!(rules.budget_cap_cents, Some(2500));
}

#[test]
fn test_reservation_status_round_trip() {
    for status in [ReservationStatus::Active, ReservationStatus::Released] {
        assert_eq!(
            ReservationStatus::from_str(status.as_str()).unwrap(),
            status
        );
    }
    assert!(ReservationStatus::from_str("PENDING").is_err());
}
