// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment graph writes: atomic draw replacement and the departure
//! repair shared by leaving, removal, and account deletion.

use diesel::SqliteConnection;
use diesel::prelude::*;
use nalka::{Assignment, RepairPlan, plan_repair};
use tracing::{debug, info, warn};

use crate::diesel_schema::assignments;
use crate::error::PersistenceError;
use crate::queries;

/// Replaces an event's assignment graph with a freshly drawn one.
///
/// Runs in a single transaction: every old edge is deleted and the new
/// set inserted, so a relaunched draw owes nothing to the previous one
/// and readers never see a mixed graph.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn replace_assignments(
    conn: &mut SqliteConnection,
    event_id: i64,
    edges: &[Assignment],
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = diesel::delete(assignments::table)
            .filter(assignments::event_id.eq(event_id))
            .execute(conn)?;

        let rows: Vec<_> = edges
            .iter()
            .map(|edge| {
                (
                    assignments::event_id.eq(event_id),
                    assignments::giver_id.eq(edge.giver_id),
                    assignments::receiver_id.eq(edge.receiver_id),
                )
            })
            .collect();
        diesel::insert_into(assignments::table)
            .values(rows)
            .execute(conn)?;

        info!(
            event_id,
            removed,
            inserted = edges.len(),
            "Replaced assignment graph"
        );
        Ok(())
    })
}

/// Repairs an event's assignment graph around a departing user.
///
/// Looks up the two edges incident to the departing user and applies
/// the planner's verdict:
/// - both edges present, distinct neighbors: the incoming giver is
///   rewired to the departing user's receiver, then the departing
///   user's own edge is deleted;
/// - both present and the neighbors coincide (a two-cycle): both edges
///   are deleted rather than reconnecting the survivor to themselves;
/// - exactly one present: the graph was already inconsistent, so the
///   dangling edge is deleted with a warning and the departure
///   proceeds;
/// - none: nothing to do.
///
/// Afterwards, unconditionally, if fewer than two members remain the
/// event's entire graph is wiped.
///
/// Runs inside the caller's departure transaction; it is not a
/// transaction of its own.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn repair_assignments_on_departure(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    let outgoing: Option<i64> = queries::assignments::outgoing_assignment(conn, event_id, user_id)?;
    let incoming: Option<i64> = queries::assignments::incoming_assignment(conn, event_id, user_id)?;

    match plan_repair(outgoing, incoming) {
        RepairPlan::Rewire {
            giver,
            new_receiver,
        } => {
            // Delete the departing user's edge first so the rewired
            // edge does not collide with the unique receiver constraint.
            diesel::delete(assignments::table)
                .filter(assignments::event_id.eq(event_id))
                .filter(assignments::giver_id.eq(user_id))
                .execute(conn)?;
            diesel::update(assignments::table)
                .filter(assignments::event_id.eq(event_id))
                .filter(assignments::giver_id.eq(giver))
                .set(assignments::receiver_id.eq(new_receiver))
                .execute(conn)?;
            debug!(event_id, user_id, giver, new_receiver, "Rewired assignment around departure");
        }
        RepairPlan::DissolvePair => {
            diesel::delete(assignments::table)
                .filter(assignments::event_id.eq(event_id))
                .filter(
                    assignments::giver_id
                        .eq(user_id)
                        .or(assignments::receiver_id.eq(user_id)),
                )
                .execute(conn)?;
            debug!(event_id, user_id, "Dissolved two-cycle on departure");
        }
        RepairPlan::DeleteDangling => {
            warn!(
                event_id,
                user_id, "Assignment graph had a dangling edge; deleting it"
            );
            diesel::delete(assignments::table)
                .filter(assignments::event_id.eq(event_id))
                .filter(
                    assignments::giver_id
                        .eq(user_id)
                        .or(assignments::receiver_id.eq(user_id)),
                )
                .execute(conn)?;
        }
        RepairPlan::Nothing => {}
    }

    // The departing user's membership row still exists at this point.
    let remaining: i64 = queries::members::member_count_excluding(conn, event_id, user_id)?;
    if remaining < 2 {
        let wiped: usize = diesel::delete(assignments::table)
            .filter(assignments::event_id.eq(event_id))
            .execute(conn)?;
        if wiped > 0 {
            info!(
                event_id,
                remaining, wiped, "Fewer than two members remain; wiped assignment graph"
            );
        }
    }

    Ok(())
}
