// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;

/// Payload format a set of events was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// Structured JSON from the update endpoint.
    Json,
    /// ICS calendar stream.
    Ics,
}

impl PayloadFormat {
    pub(crate) const fn other(self) -> Self {
        match self {
            Self::Json => Self::Ics,
            Self::Ics => Self::Json,
        }
    }
}

/// A calendar entry normalized from either feed format.
///
/// Produced fresh per fetch and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    /// Start of the event.
    pub start: Zoned,

    /// End of the event, always after `start`.
    pub end: Zoned,

    /// Human-readable label.
    pub summary: String,

    /// Room or online location, when the feed provides one.
    pub location: Option<String>,
}

impl FeedEvent {
    /// Builds an event, rejecting empty and negative durations.
    #[must_use]
    pub fn new(start: Zoned, end: Zoned, summary: String, location: Option<String>) -> Option<Self> {
        (start < end).then(|| Self {
            start,
            end,
            summary,
            location,
        })
    }

    /// Whether the event is in progress at `at`.
    #[must_use]
    pub fn contains(&self, at: &Zoned) -> bool {
        self.start <= *at && *at < self.end
    }
}
