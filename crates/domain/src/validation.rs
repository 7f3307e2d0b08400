// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation and normalization helpers.
//!
//! These are deliberately light: the goal is to reject garbage early and
//! normalize user input consistently, not to implement RFC-complete
//! parsers.

use crate::error::DomainError;

/// Maximum accepted email length (RFC 5321 path limit).
const MAX_EMAIL_LEN: usize = 254;

/// Maximum accepted title length for events and gift items.
const MAX_TITLE_LEN: usize = 120;

/// Validates and normalizes an email address.
///
/// Returns the trimmed, lowercased address.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is empty, too long,
/// or missing an `@` with characters on both sides.
pub fn validate_email(raw: &str) -> Result<String, DomainError> {
    let email: String = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from("empty address")));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(DomainError::InvalidEmail(format!(
            "address exceeds {MAX_EMAIL_LEN} characters"
        )));
    }
    let Some((local, host)) = email.split_once('@') else {
        return Err(DomainError::InvalidEmail(String::from("missing '@'")));
    };
    if local.is_empty() || host.is_empty() || !host.contains('.') {
        return Err(DomainError::InvalidEmail(String::from(
            "malformed local or host part",
        )));
    }
    Ok(email)
}

/// Validates an event title.
///
/// # Errors
///
/// Returns `DomainError::InvalidEventTitle` if the trimmed title is empty
/// or too long.
pub fn validate_event_title(raw: &str) -> Result<String, DomainError> {
    let title: &str = raw.trim();
    if title.is_empty() {
        return Err(DomainError::InvalidEventTitle(String::from("empty title")));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidEventTitle(format!(
            "title exceeds {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

/// Validates a gift item title.
///
/// # Errors
///
/// Returns `DomainError::InvalidGiftTitle` if the trimmed title is empty
/// or too long.
pub fn validate_gift_title(raw: &str) -> Result<String, DomainError> {
    let title: &str = raw.trim();
    if title.is_empty() {
        return Err(DomainError::InvalidGiftTitle(String::from("empty title")));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidGiftTitle(format!(
            "title exceeds {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

/// Normalizes a user-provided URL.
///
/// Empty input becomes `None`; a bare host gets an `https://` prefix.
#[must_use]
pub fn normalize_url(raw: Option<&str>) -> Option<String> {
    let s: &str = raw?.trim();
    if s.is_empty() {
        return None;
    }
    if s.starts_with("http://") || s.starts_with("https://") {
        Some(s.to_string())
    } else {
        Some(format!("https://{s}"))
    }
}

/// Parses a budget amount in euros into cents.
///
/// Accepts both `.` and `,` as the decimal separator. Empty input means
/// "no cap" and yields `Ok(None)`.
///
/// # Errors
///
/// Returns `DomainError::InvalidBudget` for non-numeric or negative input.
pub fn parse_budget_cents(raw: Option<&str>) -> Result<Option<i64>, DomainError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let normalized: String = s.replace(',', ".");
    let amount: f64 = normalized
        .parse()
        .map_err(|_| DomainError::InvalidBudget(format!("not a number: {s}")))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::InvalidBudget(format!(
            "must be a non-negative amount: {s}"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(Some((amount * 100.0).round() as i64))
}

/// Derives a URL slug base from an event title.
///
/// Lowercases, strips diacritics-adjacent punctuation, and collapses runs
/// of non-alphanumeric characters into single dashes. Falls back to
/// `"event"` when nothing survives. Uniqueness is the caller's problem
/// (a random suffix is appended at creation time).
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug: String = String::with_capacity(title.len());
    let mut last_dash: bool = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let trimmed: &str = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        String::from("event")
    } else {
        trimmed.to_string()
    }
}
