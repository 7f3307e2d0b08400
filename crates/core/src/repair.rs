// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The action to apply to the assignment edges around a departing user.
///
/// Produced by [`plan_repair`]; executed by the persistence layer inside
/// the departure transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPlan {
    /// Excise the departing user from their cycle: the user who gave to
    /// them now gives to whoever they gave to, and the departing user's
    /// own edge is deleted. The cycle shortens by one and stays valid.
    Rewire {
        /// The giver whose edge is redirected (C in C → A → B).
        giver: i64,
        /// The new receiver for that giver (B in C → A → B).
        new_receiver: i64,
    },
    /// The departing user sat in a two-cycle (A ↔ B). Rewiring would
    /// assign the survivor to themselves, so both edges are deleted and
    /// the survivor keeps no assignment until a redraw.
    DissolvePair,
    /// Exactly one of the two expected edges exists. This is a data
    /// inconsistency; the dangling edge is deleted and the anomaly is
    /// logged by the executor, which then proceeds normally.
    DeleteDangling,
    /// No edge touches the departing user: no draw is active, or the user
    /// was never part of the current one.
    Nothing,
}

/// Plans the local repair for a departing participant.
///
/// `outgoing` is the receiver of the departing user's own edge (B in
/// A → B), if any; `incoming` is the giver assigned to the departing user
/// (C in C → A), if any. Both lookups are cheap indexed reads; the full
/// graph is never needed.
///
/// The planner is total: every combination of present and absent edges
/// maps to an action, so a departure can always proceed.
#[must_use]
pub const fn plan_repair(outgoing: Option<i64>, incoming: Option<i64>) -> RepairPlan {
    match (outgoing, incoming) {
        (Some(receiver), Some(giver)) => {
            if giver == receiver {
                RepairPlan::DissolvePair
            } else {
                RepairPlan::Rewire {
                    giver,
                    new_receiver: receiver,
                }
            }
        }
        (Some(_), None) | (None, Some(_)) => RepairPlan::DeleteDangling,
        (None, None) => RepairPlan::Nothing,
    }
}
