// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Caller-facing result shapes.
//!
//! These are the terminal objects handed to the protocol-dispatch layer.
//! All timestamps are rendered as full ISO-8601 UTC strings.

use edtcal_ade::{FeedEvent, PayloadFormat};
use jiff::Zoned;

use crate::error::Error;
use crate::resolver::{Availability, NextEvent};

fn iso(t: &Zoned) -> String {
    t.timestamp().to_string()
}

/// The `next` field of a [`NextEventReport`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NextEventView {
    /// Event start, ISO-8601.
    pub start: String,

    /// Event end, ISO-8601.
    pub end: String,

    /// Event label.
    pub summary: String,

    /// Event location, when the feed provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Whether the event is already in progress at the reference time.
    pub ongoing: bool,
}

/// Outcome of a next-event query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NextEventReport {
    /// Whether resolution succeeded.
    pub ok: bool,

    /// Payload format the answer was derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PayloadFormat>,

    /// The resolved event, `None` on failure.
    pub next: Option<NextEventView>,

    /// Failure message, `None` on success.
    pub error: Option<String>,
}

impl NextEventReport {
    pub(crate) fn success(next: &NextEvent, source: PayloadFormat) -> Self {
        let event = next.event();
        Self {
            ok: true,
            source: Some(source),
            next: Some(NextEventView {
                start: iso(&event.start),
                end: iso(&event.end),
                summary: event.summary.clone(),
                location: event.location.clone(),
                ongoing: next.is_ongoing(),
            }),
            error: None,
        }
    }

    pub(crate) fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            source: None,
            next: None,
            error: Some(error.to_string()),
        }
    }
}

/// Outcome of a room-availability query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AvailabilityReport {
    /// Whether resolution succeeded.
    pub ok: bool,

    /// Whether no event blocks the requested window.
    pub free: bool,

    /// End of the occupied span, ISO-8601, when blocked.
    pub occupied_until: Option<String>,

    /// Start of the next occupation, ISO-8601, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_until: Option<String>,

    /// Failure message, `None` on success.
    pub error: Option<String>,
}

impl AvailabilityReport {
    pub(crate) fn success(availability: &Availability) -> Self {
        Self {
            ok: true,
            free: availability.free,
            occupied_until: availability.occupied_until.as_ref().map(iso),
            free_until: availability.free_until.as_ref().map(iso),
            error: None,
        }
    }

    /// A day with no recorded events: free, nothing scheduled.
    pub(crate) fn all_clear() -> Self {
        Self {
            ok: true,
            free: true,
            occupied_until: None,
            free_until: None,
            error: None,
        }
    }

    pub(crate) fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            free: false,
            occupied_until: None,
            free_until: None,
            error: Some(error.to_string()),
        }
    }
}

/// Where a person currently is, per their timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateStatus {
    /// Currently in an event.
    InClass,

    /// Free now, with a later event scheduled.
    FreeNow,

    /// Nothing scheduled for the rest of the day.
    FreeAllDay,
}

/// Outcome of a locate query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LocateReport {
    /// Whether resolution succeeded.
    pub ok: bool,

    /// Where the person is, `None` on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LocateStatus>,

    /// End of the current event when in class, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,

    /// Start of the next event when free, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start: Option<String>,

    /// Location of the current or next event. Falls back to the event
    /// label when the feed carries no explicit location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Label of the current or next event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Failure message, `None` on success.
    pub error: Option<String>,
}

impl LocateReport {
    pub(crate) fn in_class(event: &FeedEvent) -> Self {
        Self {
            ok: true,
            status: Some(LocateStatus::InClass),
            until: Some(iso(&event.end)),
            next_start: None,
            location: location_of(event),
            summary: Some(event.summary.clone()),
            error: None,
        }
    }

    pub(crate) fn free_now(event: &FeedEvent) -> Self {
        Self {
            ok: true,
            status: Some(LocateStatus::FreeNow),
            until: None,
            next_start: Some(iso(&event.start)),
            location: location_of(event),
            summary: Some(event.summary.clone()),
            error: None,
        }
    }

    pub(crate) fn free_all_day() -> Self {
        Self {
            ok: true,
            status: Some(LocateStatus::FreeAllDay),
            until: None,
            next_start: None,
            location: None,
            summary: None,
            error: None,
        }
    }

    pub(crate) fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            status: None,
            until: None,
            next_start: None,
            location: None,
            summary: None,
            error: Some(error.to_string()),
        }
    }
}

fn location_of(event: &FeedEvent) -> Option<String> {
    event
        .location
        .clone()
        .or_else(|| Some(event.summary.clone()))
}
