// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::test_db;

const FUTURE: &str = "2999-01-01 00:00:00";
const PAST: &str = "2000-01-01 00:00:00";

#[test]
fn test_session_roundtrip() {
    let mut persistence = test_db();
    let user_id = persistence.upsert_user("carol@example.com", None).unwrap();

    let session_id = persistence
        .create_session("token-abc", user_id, FUTURE)
        .unwrap();
    let session = persistence
        .get_session_by_token("token-abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, user_id);

    persistence.update_session_activity(session_id).unwrap();
    persistence.delete_session("token-abc").unwrap();
    assert!(
        persistence
            .get_session_by_token("token-abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_expired_sessions_are_swept() {
    let mut persistence = test_db();
    let user_id = persistence.upsert_user("dave@example.com", None).unwrap();
    persistence
        .create_session("token-live", user_id, FUTURE)
        .unwrap();
    persistence
        .create_session("token-dead", user_id, PAST)
        .unwrap();

    assert_eq!(persistence.delete_expired_sessions().unwrap(), 1);
    assert!(
        persistence
            .get_session_by_token("token-live")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_login_token_consumes_exactly_once() {
    let mut persistence = test_db();
    persistence
        .create_login_token("tok-1", "erin@example.com", FUTURE)
        .unwrap();

    assert_eq!(
        persistence.consume_login_token("tok-1").unwrap().as_deref(),
        Some("erin@example.com")
    );
    assert_eq!(persistence.consume_login_token("tok-1").unwrap(), None);

    let row = persistence.get_login_token("tok-1").unwrap().unwrap();
    assert_eq!(row.consumed, 1);
}

#[test]
fn test_expired_login_token_is_rejected() {
    let mut persistence = test_db();
    persistence
        .create_login_token("tok-old", "erin@example.com", PAST)
        .unwrap();

    assert_eq!(persistence.consume_login_token("tok-old").unwrap(), None);
    assert_eq!(persistence.consume_login_token("missing").unwrap(), None);
}

#[test]
fn test_rate_limit_counts_hits_within_the_window() {
    let mut persistence = test_db();
    assert_eq!(
        persistence.record_rate_limit_hit("invite:1.2.3.4", PAST).unwrap(),
        0
    );
    assert_eq!(
        persistence.record_rate_limit_hit("invite:1.2.3.4", PAST).unwrap(),
        1
    );
    assert_eq!(
        persistence.record_rate_limit_hit("invite:1.2.3.4", PAST).unwrap(),
        2
    );
    // Distinct keys do not share a budget.
    assert_eq!(
        persistence.record_rate_limit_hit("invite:5.6.7.8", PAST).unwrap(),
        0
    );
}

#[test]
fn test_rate_limit_garbage_collects_old_hits() {
    let mut persistence = test_db();
    persistence.record_rate_limit_hit("login:x", PAST).unwrap();
    persistence.record_rate_limit_hit("login:x", PAST).unwrap();

    // A window opening in the future counts nothing and sweeps
    // everything older than it.
    assert_eq!(
        persistence.record_rate_limit_hit("login:x", FUTURE).unwrap(),
        0
    );
    // Only the hit recorded by the sweeping call itself survives.
    assert_eq!(persistence.record_rate_limit_hit("login:x", PAST).unwrap(), 1);
}
