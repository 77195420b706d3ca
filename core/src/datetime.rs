// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Loose time-bound parsing.
//!
//! Callers may bound a query with anything from a bare `HH:MM` (meaning
//! "the reference date at that time") up to a full ISO-8601 datetime with
//! an explicit offset.

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::error::Error;

/// Parses an optional bound string relative to `now`.
///
/// Accepted forms: `HH:MM[:SS]` (the reference date at that time),
/// ISO-8601 datetime with or without an offset, a bare date (start of that
/// day), and the words `today` / `tomorrow`. Empty and missing values
/// yield `None`.
///
/// # Errors
///
/// Returns [`Error::InvalidBound`] when the string matches none of the
/// accepted forms.
pub fn parse_bound(value: Option<&str>, now: &Zoned) -> Result<Option<Zoned>, Error> {
    let Some(s) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match parse_one(s, now) {
        Some(bound) => Ok(Some(bound)),
        None => Err(Error::InvalidBound(s.to_string())),
    }
}

fn parse_one(s: &str, now: &Zoned) -> Option<Zoned> {
    let tz = now.time_zone().clone();

    if s.eq_ignore_ascii_case("today") {
        return start_of_day(now.date(), &tz);
    }
    if s.eq_ignore_ascii_case("tomorrow") {
        return start_of_day(now.date().tomorrow().ok()?, &tz);
    }

    // Full ISO-8601 with an offset or Z.
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts.to_zoned(tz));
    }
    // ISO-8601 datetime without an offset, in the reference timezone.
    if let Ok(dt) = s.parse::<DateTime>() {
        return dt.to_zoned(tz).ok();
    }
    // Bare date: start of that day.
    if let Ok(d) = s.parse::<Date>() {
        return start_of_day(d, &tz);
    }
    // Bare time: the reference date at that time.
    let t = s.parse::<Time>().ok()?;
    DateTime::from_parts(now.date(), t).to_zoned(tz).ok()
}

fn start_of_day(d: Date, tz: &TimeZone) -> Option<Zoned> {
    d.at(0, 0, 0, 0).to_zoned(tz.clone()).ok()
}
