// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Maximum attempts the retry wrapper makes before abandoning a draw.
pub const MAX_DRAW_ATTEMPTS: usize = 8;

/// One directed giver → receiver edge of a draw, scoped to an event by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// The participant who gives.
    pub giver_id: i64,
    /// The participant who receives.
    pub receiver_id: i64,
}

/// Generates a full assignment set over the given participants.
///
/// The participant slice must contain distinct user ids; order matters
/// only in that it decides which pairs end up adjacent after the repair
/// pass, not correctness. The algorithm:
///
/// 1. Copy the participants into a receiver ordering and shuffle it
///    (Fisher–Yates via [`SliceRandom::shuffle`]).
/// 2. Pair participant `i` with shuffled receiver `i`.
/// 3. One left-to-right repair pass: every self-pairing at index `i` is
///    swapped with index `(i + 1) % k`. The pass is not iterated.
/// 4. A final check rejects any surviving self-pairing.
///
/// The result is NOT uniform over all derangements: the neighbor-swap
/// repair makes some outcomes more likely than others. That bias is
/// accepted; nothing in the product depends on uniformity.
///
/// # Errors
///
/// * `CoreError::NotEnoughParticipants` when fewer than two ids are given.
/// * `CoreError::SelfPairingRemained` when the repair pass could not clear
///   every self-pairing. Callers should retry with fresh randomness (see
///   [`draw_with_retries`]) rather than treat this as permanent.
pub fn assign_receivers<R: Rng + ?Sized>(
    participants: &[i64],
    rng: &mut R,
) -> Result<Vec<Assignment>, CoreError> {
    let k: usize = participants.len();
    if k < 2 {
        return Err(CoreError::NotEnoughParticipants(k));
    }

    let mut receivers: Vec<i64> = participants.to_vec();
    receivers.shuffle(rng);

    // Single repair pass, left to right. Swapping with the next index
    // cannot reintroduce a self-pairing at an already-visited index
    // because participant ids are distinct.
    for i in 0..k {
        if participants[i] == receivers[i] {
            let j: usize = (i + 1) % k;
            receivers.swap(i, j);
        }
    }

    if participants
        .iter()
        .zip(receivers.iter())
        .any(|(giver, receiver)| giver == receiver)
    {
        return Err(CoreError::SelfPairingRemained);
    }

    Ok(participants
        .iter()
        .zip(receivers)
        .map(|(&giver_id, receiver_id)| Assignment {
            giver_id,
            receiver_id,
        })
        .collect())
}

/// Generates a draw, retrying a bounded number of times on a failed
/// repair pass.
///
/// # Errors
///
/// * `CoreError::NotEnoughParticipants` immediately when fewer than two
///   ids are given — retrying cannot help.
/// * `CoreError::DrawExhausted` when every attempt left a self-pairing.
pub fn draw_with_retries<R: Rng + ?Sized>(
    participants: &[i64],
    rng: &mut R,
    max_attempts: usize,
) -> Result<Vec<Assignment>, CoreError> {
    let mut attempts: usize = 0;
    while attempts < max_attempts {
        attempts += 1;
        match assign_receivers(participants, rng) {
            Ok(assignments) => return Ok(assignments),
            Err(CoreError::SelfPairingRemained) => {}
            Err(other) => return Err(other),
        }
    }
    Err(CoreError::DrawExhausted { attempts })
}

/// Checks that `assignments` forms a derangement over `participants`.
///
/// Every participant must appear exactly once as a giver and exactly once
/// as a receiver, and no participant may be paired with themselves.
///
/// # Errors
///
/// Returns `CoreError::InvalidAssignmentSet` naming the first violated
/// invariant.
pub fn verify_derangement(
    participants: &[i64],
    assignments: &[Assignment],
) -> Result<(), CoreError> {
    let expected: HashSet<i64> = participants.iter().copied().collect();
    if assignments.len() != expected.len() {
        return Err(CoreError::InvalidAssignmentSet(format!(
            "expected {} edges, found {}",
            expected.len(),
            assignments.len()
        )));
    }

    let mut givers: HashSet<i64> = HashSet::with_capacity(assignments.len());
    let mut receivers: HashSet<i64> = HashSet::with_capacity(assignments.len());
    for edge in assignments {
        if edge.giver_id == edge.receiver_id {
            return Err(CoreError::InvalidAssignmentSet(format!(
                "user {} is assigned to themselves",
                edge.giver_id
            )));
        }
        if !expected.contains(&edge.giver_id) || !expected.contains(&edge.receiver_id) {
            return Err(CoreError::InvalidAssignmentSet(format!(
                "edge {} -> {} references a non-participant",
                edge.giver_id, edge.receiver_id
            )));
        }
        if !givers.insert(edge.giver_id) {
            return Err(CoreError::InvalidAssignmentSet(format!(
                "user {} gives twice",
                edge.giver_id
            )));
        }
        if !receivers.insert(edge.receiver_id) {
            return Err(CoreError::InvalidAssignmentSet(format!(
                "user {} receives twice",
                edge.receiver_id
            )));
        }
    }
    Ok(())
}
