// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod role;
mod rules;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use role::MemberRole;
pub use rules::{EventRules, ReservationStatus};
pub use validation::{
    normalize_url, parse_budget_cents, slugify, validate_email, validate_event_title,
    validate_gift_title,
};
