// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Parses human-friendly search window durations such as `30m`, `24h`,
//! or `2d`.

use chrono::TimeDelta;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?<amount>[0-9]+)(?<unit>[a-z]+)$").expect("invalid duration pattern")
});

/// The furthest back the recent-search endpoint will look.
pub const MAX_LOOKBACK: TimeDelta = TimeDelta::days(7);

/// A search window, i.e., how far back from now to look for posts.
///
/// A window remembers the token it was parsed from so it can be echoed
/// back to the user exactly as it was typed.
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    token: String,
    span: TimeDelta,
}

impl Window {
    /// The window as it was originally specified, e.g., `24h`.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The length of the window.
    pub fn span(&self) -> TimeDelta {
        self.span
    }

    /// The length of the window in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.span.num_milliseconds()
    }

    /// True if the window reaches no further back than [`MAX_LOOKBACK`].
    pub fn within_lookback(&self) -> bool {
        self.span <= MAX_LOOKBACK
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

impl Serialize for Window {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token)
    }
}

/// Parses a duration token of the form `<positive integer><unit>`, where
/// `unit` is one of `m` (minutes), `h` (hours), or `d` (days). Units are
/// case-insensitive.
///
/// The 7-day lookback policy is _not_ enforced here; see
/// [`SearchRequest`](crate::request::SearchRequest).
///
/// # Examples
///
/// ```
/// use xrecent::duration::parse_window;
/// assert_eq!(parse_window("24h").unwrap().as_millis(), 86_400_000);
/// assert_eq!(parse_window("30M").unwrap().as_millis(), 1_800_000);
/// assert!(parse_window("abc").is_err());
/// ```
pub fn parse_window(token: &str) -> Result<Window, DurationError> {
    let token = token.trim();
    let caps = DURATION_RE
        .captures(token)
        .ok_or_else(|| DurationError::Malformed(token.to_string()))?;

    let amount: i64 = caps["amount"]
        .parse()
        .map_err(|_| DurationError::OutOfRange(token.to_string()))?;
    if amount <= 0 {
        return Err(DurationError::NonPositive(token.to_string()));
    }

    let span = match caps["unit"].to_lowercase().as_str() {
        "m" => TimeDelta::try_minutes(amount),
        "h" => TimeDelta::try_hours(amount),
        "d" => TimeDelta::try_days(amount),
        unit => return Err(DurationError::UnknownUnit(unit.to_string())),
    }
    .ok_or_else(|| DurationError::OutOfRange(token.to_string()))?;

    Ok(Window {
        token: token.to_string(),
        span,
    })
}

/// Indicates a search window could not be parsed or is not allowed.
#[derive(Debug, Error, PartialEq)]
pub enum DurationError {
    /// The token does not look like `<number><unit>`.
    #[error("invalid duration '{0}': expected something like 30m, 24h, or 2d")]
    Malformed(String),

    /// The numeric part of the token is zero.
    #[error("invalid duration '{0}': must be greater than zero")]
    NonPositive(String),

    /// The numeric part of the token is too large to represent.
    #[error("invalid duration '{0}': value is too large")]
    OutOfRange(String),

    /// The unit is not one of m, h, or d.
    #[error("invalid duration unit '{0}': use m, h, or d")]
    UnknownUnit(String),

    /// The window reaches further back than the endpoint allows.
    #[error("window '{0}' exceeds the 7-day recent-search limit")]
    ExceedsLookback(String),
}
