// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::seeded_rng;
use crate::{
    Assignment, CoreError, MAX_DRAW_ATTEMPTS, assign_receivers, draw_with_retries,
    verify_derangement,
};

#[test]
fn test_zero_participants_rejected() {
    let result = assign_receivers(&[], &mut seeded_rng(1));
    assert_eq!(result.unwrap_err(), CoreError::NotEnoughParticipants(0));
}

#[test]
fn test_single_participant_rejected() {
    let result = assign_receivers(&[7], &mut seeded_rng(1));
    assert_eq!(result.unwrap_err(), CoreError::NotEnoughParticipants(1));
}

#[test]
fn test_two_participants_swap() {
    let participants: Vec<i64> = vec![1, 2];
    for seed in 0..50 {
        let assignments = assign_receivers(&participants, &mut seeded_rng(seed)).unwrap();
        verify_derangement(&participants, &assignments).unwrap();
        // With two participants the only derangement is the swap.
        assert!(assignments.contains(&Assignment {
            giver_id: 1,
            receiver_id: 2
        }));
        assert!(assignments.contains(&Assignment {
            giver_id: 2,
            receiver_id: 1
        }));
    }
}

#[test]
fn test_no_fixed_points_across_sizes_and_seeds() {
    for k in 2..=10_i64 {
        let participants: Vec<i64> = (1..=k).collect();
        for seed in 0..200 {
            let assignments =
                draw_with_retries(&participants, &mut seeded_rng(seed), MAX_DRAW_ATTEMPTS)
                    .unwrap();
            verify_derangement(&participants, &assignments).unwrap();
        }
    }
}

#[test]
fn test_edge_count_matches_participants() {
    let participants: Vec<i64> = vec![10, 20, 30, 40, 50];
    let assignments = assign_receivers(&participants, &mut seeded_rng(42)).unwrap();
    assert_eq!(assignments.len(), participants.len());
}

#[test]
fn test_same_seed_is_deterministic() {
    let participants: Vec<i64> = vec![1, 2, 3, 4, 5, 6];
    let first = assign_receivers(&participants, &mut seeded_rng(99)).unwrap();
    let second = assign_receivers(&participants, &mut seeded_rng(99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_eventually_differ() {
    let participants: Vec<i64> = vec![1, 2, 3, 4, 5, 6];
    let baseline = assign_receivers(&participants, &mut seeded_rng(0)).unwrap();
    let diverged = (1..100)
        .any(|seed| assign_receivers(&participants, &mut seeded_rng(seed)).unwrap() != baseline);
    assert!(diverged, "every seed produced the identical draw");
}

#[test]
fn test_retry_wrapper_propagates_precondition_failure() {
    let result = draw_with_retries(&[1], &mut seeded_rng(3), MAX_DRAW_ATTEMPTS);
    assert_eq!(result.unwrap_err(), CoreError::NotEnoughParticipants(1));
}

#[test]
fn test_verify_rejects_self_pairing() {
    let participants: Vec<i64> = vec![1, 2];
    let bogus: Vec<Assignment> = vec![
        Assignment {
            giver_id: 1,
            receiver_id: 1,
        },
        Assignment {
            giver_id: 2,
            receiver_id: 2,
        },
    ];
    assert!(matches!(
        verify_derangement(&participants, &bogus),
        Err(CoreError::InvalidAssignmentSet(_))
    ));
}

#[test]
fn test_verify_rejects_missing_edge() {
    let participants: Vec<i64> = vec![1, 2, 3];
    let short: Vec<Assignment> = vec![Assignment {
        giver_id: 1,
        receiver_id: 2,
    }];
    assert!(matches!(
        verify_derangement(&participants, &short),
        Err(CoreError::InvalidAssignmentSet(_))
    ));
}

#[test]
fn test_verify_rejects_duplicate_receiver() {
    let participants: Vec<i64> = vec![1, 2, 3];
    let bogus: Vec<Assignment> = vec![
        Assignment {
            giver_id: 1,
            receiver_id: 2,
        },
        Assignment {
            giver_id: 2,
            receiver_id: 1,
        },
        Assignment {
            giver_id: 3,
            receiver_id: 2,
        },
    ];
    assert!(matches!(
        verify_derangement(&participants, &bogus),
        Err(CoreError::InvalidAssignmentSet(_))
    ));
}

#[test]
fn test_verify_accepts_multiple_disjoint_cycles() {
    // Two 2-cycles: a permutation need not be a single cycle.
    let participants: Vec<i64> = vec![1, 2, 3, 4];
    let edges: Vec<Assignment> = vec![
        Assignment {
            giver_id: 1,
            receiver_id: 2,
        },
        Assignment {
            giver_id: 2,
            receiver_id: 1,
        },
        Assignment {
            giver_id: 3,
            receiver_id: 4,
        },
        Assignment {
            giver_id: 4,
            receiver_id: 3,
        },
    ];
    verify_derangement(&participants, &edges).unwrap();
}
