// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use edtcal_ade::FeedError;

/// Engine failure taxonomy.
///
/// Every variant is converted into an `{ok: false, error}` report at the
/// facade boundary; none escapes a resolution call as a panic.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No name was given and no default timetable is configured.
    #[error("no name given and no default timetable configured")]
    NoIdentityConfigured,

    /// No reference record matches the requested name.
    #[error("no timetable entry matches \"{0}\"")]
    NotFound(String),

    /// A time-bound string could not be understood.
    #[error("unrecognized time bound \"{0}\"")]
    InvalidBound(String),

    /// The requested window ends before the reference time.
    #[error("time window ends before it starts")]
    InvalidRange,

    /// No event is ongoing or starts after the reference time.
    #[error("no upcoming event")]
    NoUpcomingEvent,

    /// Malformed reference data at load time.
    #[error("malformed reference data: {0}")]
    Reference(String),

    /// Failure reported by the feed crate, fetching or decoding.
    #[error(transparent)]
    Feed(#[from] FeedError),
}
