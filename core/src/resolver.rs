// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Derived answers over a normalized event sequence.
//!
//! Both functions are pure and expect the sequence sorted ascending by
//! start time, as the payload parser produces it.

use edtcal_ade::FeedEvent;
use jiff::Zoned;

use crate::error::Error;

/// The resolved "next event" view, distinguishing an event already in
/// progress from one starting later.
#[derive(Debug, Clone, PartialEq)]
pub enum NextEvent {
    /// The reference time falls inside this event.
    Ongoing(FeedEvent),

    /// This event is the earliest one starting after the reference time.
    Upcoming(FeedEvent),
}

impl NextEvent {
    /// The underlying event.
    #[must_use]
    pub fn event(&self) -> &FeedEvent {
        match self {
            Self::Ongoing(e) | Self::Upcoming(e) => e,
        }
    }

    /// Whether the event is already in progress.
    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        matches!(self, Self::Ongoing(_))
    }
}

/// Room availability over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    /// Whether no event blocks the window.
    pub free: bool,

    /// End of the occupied span when blocked.
    pub occupied_until: Option<Zoned>,

    /// Start of the next occupation when free, if one is scheduled.
    pub free_until: Option<Zoned>,
}

/// Returns the event in progress at `now`, or the earliest event starting
/// strictly after it. Ties on identical starts keep feed order.
///
/// # Errors
///
/// Returns [`Error::NoUpcomingEvent`] when nothing is ongoing or upcoming.
pub fn next_event(events: &[FeedEvent], now: &Zoned) -> Result<NextEvent, Error> {
    if let Some(ongoing) = events.iter().find(|e| e.contains(now)) {
        return Ok(NextEvent::Ongoing(ongoing.clone()));
    }
    events
        .iter()
        .find(|e| e.start > *now)
        .map(|e| NextEvent::Upcoming(e.clone()))
        .ok_or(Error::NoUpcomingEvent)
}

/// Answers "is the room free, and if not until when".
///
/// An event blocks if its interval `[start, end)` intersects
/// `[max(now, window_start), window_end or +∞)`. Overlapping and
/// back-to-back blocking events merge into a single occupied span, so two
/// touching lectures read as one occupation.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] when the window ends before the
/// reference time.
pub fn availability(
    events: &[FeedEvent],
    now: &Zoned,
    window_start: Option<&Zoned>,
    window_end: Option<&Zoned>,
) -> Result<Availability, Error> {
    if let Some(end) = window_end {
        if end < now {
            return Err(Error::InvalidRange);
        }
    }

    let reference = match window_start {
        Some(ws) if *ws > *now => ws,
        _ => now,
    };

    let blocking: Vec<&FeedEvent> = events
        .iter()
        .filter(|e| e.end > *reference && window_end.is_none_or(|we| e.start < *we))
        .collect();

    let Some(first) = blocking.first() else {
        let free_until = events
            .iter()
            .find(|e| e.start > *reference)
            .map(|e| e.start.clone());
        return Ok(Availability {
            free: true,
            occupied_until: None,
            free_until,
        });
    };

    // Merge the contiguous run anchored at the first blocking event;
    // touching boundaries count as one occupied span.
    let mut occupied_until = first.end.clone();
    for e in blocking.iter().skip(1) {
        if e.start > occupied_until {
            break;
        }
        if e.end > occupied_until {
            occupied_until = e.end.clone();
        }
    }

    Ok(Availability {
        free: false,
        occupied_until: Some(occupied_until),
        free_until: None,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;

    fn at(hour: i8, minute: i8) -> Zoned {
        date(2025, 10, 25)
            .at(hour, minute, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn ev(start: (i8, i8), end: (i8, i8), summary: &str) -> FeedEvent {
        FeedEvent::new(at(start.0, start.1), at(end.0, end.1), summary.to_string(), None).unwrap()
    }

    #[test]
    fn next_event_picks_earliest_future_start() {
        let events = [ev((8, 0), (9, 0), "A"), ev((10, 0), (11, 0), "B")];
        // 09:00: "A" is over (end exclusive), "B" has not started.
        let next = next_event(&events, &at(9, 0)).unwrap();
        assert_eq!(next.event().summary, "B");
        assert!(!next.is_ongoing());
    }

    #[test]
    fn next_event_surfaces_ongoing_distinctly() {
        let events = [ev((8, 0), (10, 0), "A"), ev((10, 0), (11, 0), "B")];
        let next = next_event(&events, &at(9, 0)).unwrap();
        assert_eq!(next.event().summary, "A");
        assert!(next.is_ongoing());
    }

    #[test]
    fn next_event_breaks_start_ties_by_feed_order() {
        let events = [ev((10, 0), (11, 0), "first"), ev((10, 0), (12, 0), "second")];
        let next = next_event(&events, &at(9, 0)).unwrap();
        assert_eq!(next.event().summary, "first");
    }

    #[test]
    fn next_event_on_empty_day_fails() {
        assert!(matches!(
            next_event(&[], &at(9, 0)),
            Err(Error::NoUpcomingEvent)
        ));
    }

    #[test]
    fn availability_of_empty_sequence_is_free() {
        let a = availability(&[], &at(9, 0), None, None).unwrap();
        assert!(a.free);
        assert!(a.occupied_until.is_none());
        assert!(a.free_until.is_none());
    }

    #[test]
    fn availability_merges_back_to_back_events() {
        let events = [ev((9, 0), (10, 0), "A"), ev((10, 0), (11, 0), "B")];
        let a = availability(&events, &at(9, 30), None, None).unwrap();
        assert!(!a.free);
        assert_eq!(a.occupied_until, Some(at(11, 0)));
    }

    #[test]
    fn availability_does_not_merge_across_gaps() {
        let events = [ev((9, 0), (10, 0), "A"), ev((10, 30), (11, 0), "B")];
        let a = availability(&events, &at(9, 30), None, None).unwrap();
        assert_eq!(a.occupied_until, Some(at(10, 0)));
    }

    #[test]
    fn availability_free_until_next_event() {
        let events = [ev((14, 0), (15, 0), "later")];
        let a = availability(&events, &at(9, 0), None, Some(&at(12, 0))).unwrap();
        assert!(a.free, "the 14:00 event is outside the window");
        assert_eq!(a.free_until, Some(at(14, 0)));
    }

    #[test]
    fn availability_blocks_on_event_later_in_window() {
        // Free right now, but not free over the requested window.
        let events = [ev((10, 0), (11, 0), "A")];
        let a = availability(&events, &at(9, 0), None, Some(&at(12, 0))).unwrap();
        assert!(!a.free);
        assert_eq!(a.occupied_until, Some(at(11, 0)));
    }

    #[test]
    fn availability_event_ending_at_reference_does_not_block() {
        let events = [ev((8, 0), (9, 0), "A")];
        let a = availability(&events, &at(9, 0), None, None).unwrap();
        assert!(a.free);
    }

    #[test]
    fn availability_window_start_moves_the_reference() {
        let events = [ev((8, 0), (9, 30), "A"), ev((14, 0), (15, 0), "B")];
        let a = availability(&events, &at(9, 0), Some(&at(10, 0)), None).unwrap();
        // At the window start the morning event is already over.
        assert!(!a.free);
        assert_eq!(a.occupied_until, Some(at(15, 0)));
    }

    #[test]
    fn availability_rejects_window_ending_before_reference() {
        assert!(matches!(
            availability(&[], &at(14, 0), None, Some(&at(9, 0))),
            Err(Error::InvalidRange)
        ));
    }
}
