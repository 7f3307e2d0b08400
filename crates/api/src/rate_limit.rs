// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sliding-window rate limiting backed by the hits table.
//!
//! Each check counts the key's hits inside the window, records the new
//! hit, and garbage-collects everything older, all in one persistence
//! call. State lives in the database, so limits hold across restarts.

use time::{Duration, OffsetDateTime};
use tracing::warn;

use nalka_persistence::Persistence;

use crate::auth::format_timestamp;
use crate::error::ApiError;

/// Records a hit for `key` and fails if the window already held `max`
/// hits or more.
///
/// # Errors
///
/// Returns [`ApiError::RateLimited`] when the budget is exhausted, or
/// an error if persistence fails.
pub fn enforce_limit(
    persistence: &mut Persistence,
    key: &str,
    max: i64,
    window: Duration,
) -> Result<(), ApiError> {
    let since: String = format_timestamp(OffsetDateTime::now_utc() - window)?;
    let prior: i64 = persistence.record_rate_limit_hit(key, &since)?;
    if prior >= max {
        warn!(key, prior, max, "Rate limit exceeded");
        return Err(ApiError::RateLimited {
            key: key.to_string(),
        });
    }
    Ok(())
}
