// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Feed request construction.

use jiff::Zoned;
use jiff::civil::Date;

use crate::error::FeedError;

/// Kind of timetable resource a feed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A teacher's timetable.
    Professor,
    /// A room's occupancy timetable.
    Room,
    /// A student group's timetable.
    Student,
    /// An institution-level timetable.
    Institution,
}

/// ADE feed identity.
///
/// Both halves are required to address a feed; a record carrying only one
/// of them cannot be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedId {
    /// ADE project the resource lives in (`adeBase` query parameter).
    pub project: i64,

    /// Resource number inside the project (`adeRessources` query parameter).
    pub resource: i64,
}

/// A fully formed feed request, built once per resolution call.
#[derive(Debug, Clone)]
pub struct QueryDescriptor {
    /// Feed to query.
    pub feed: FeedId,

    /// Kind of resource the feed belongs to.
    pub kind: Kind,

    /// Day the feed is asked to report.
    pub date: Date,

    /// Lower bound of the caller's window, if any.
    pub start: Option<Zoned>,

    /// Upper bound of the caller's window, if any.
    pub end: Option<Zoned>,
}

impl QueryDescriptor {
    /// Creates a descriptor, validating the optional window.
    ///
    /// When no bounds are supplied the feed's default window applies.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidRange`] if both bounds are present and
    /// the end precedes the start.
    pub fn new(
        feed: FeedId,
        kind: Kind,
        date: Date,
        start: Option<Zoned>,
        end: Option<Zoned>,
    ) -> Result<Self, FeedError> {
        if let (Some(s), Some(e)) = (&start, &end) {
            if s > e {
                return Err(FeedError::InvalidRange);
            }
        }
        Ok(Self {
            feed,
            kind,
            date,
            start,
            end,
        })
    }

    /// The update-endpoint URL for this descriptor.
    ///
    /// All parameter values are numeric or ISO dates, so no percent
    /// encoding is needed.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{base_url}?adeBase={}&adeRessources={}&lastUpdate=0&date={}",
            self.feed.project, self.feed.resource, self.date
        )
    }
}
