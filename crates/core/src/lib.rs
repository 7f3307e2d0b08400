// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Secret Santa assignment engine.
//!
//! This crate holds the two pieces of Nalka that carry real invariants:
//! generating a random derangement over the participants of an event
//! (everyone gives to exactly one person, receives from exactly one
//! person, and nobody draws themselves), and incrementally repairing that
//! derangement when a single participant departs, without redrawing and
//! spoiling assignments other participants have already seen.
//!
//! Everything here is pure: randomness is injected, storage is someone
//! else's job. The assignment set lives in the database as one row per
//! giver; the repair planner therefore only ever needs the two edges
//! incident to the departing user, never the whole graph.

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

mod draw;
mod error;
mod repair;

#[cfg(test)]
mod tests;

pub use draw::{
    Assignment, MAX_DRAW_ATTEMPTS, assign_receivers, draw_with_retries, verify_derangement,
};
pub use error::CoreError;
pub use repair::{RepairPlan, plan_repair};
