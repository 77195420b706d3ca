// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Engine facade.

use edtcal_ade::{Fetch, FeedError, FeedEvent, Kind, PayloadFormat, QueryDescriptor, parse};
use jiff::Zoned;
use tracing::warn;

use crate::config::Config;
use crate::datetime::parse_bound;
use crate::directory::{Directory, ReferenceRecord};
use crate::error::Error;
use crate::report::{AvailabilityReport, LocateReport, NextEventReport};
use crate::resolver;

/// Timetable resolution engine.
///
/// Holds the configuration, the read-only reference directory and the
/// fetch collaborator. Each operation is stateless beyond its own inputs,
/// so an instance can be shared between concurrent callers.
#[derive(Debug, Clone)]
pub struct Edt<F> {
    now: Zoned,
    config: Config,
    directory: Directory,
    fetcher: F,
}

impl<F: Fetch> Edt<F> {
    /// Creates an engine instance answering against the current instant.
    #[must_use]
    pub fn new(config: Config, directory: Directory, fetcher: F) -> Self {
        Self {
            now: Zoned::now(),
            config,
            directory,
            fetcher,
        }
    }

    /// The reference time the engine answers against.
    #[must_use]
    pub fn now(&self) -> &Zoned {
        &self.now
    }

    /// Refreshes the reference time to the current instant.
    pub fn refresh_now(&mut self) {
        self.now = Zoned::now();
    }

    /// Pins the reference time, mainly for tests and replay.
    #[must_use]
    pub fn with_now(mut self, now: Zoned) -> Self {
        self.now = now;
        self
    }

    /// Next scheduled event for a timetable name.
    ///
    /// An empty `name` (or a self alias) falls back to the configured
    /// default timetable. Every failure is folded into the report.
    pub async fn next_event(&self, name: Option<&str>) -> NextEventReport {
        match self.next_event_inner(name).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "next-event resolution failed");
                NextEventReport::failure(&e)
            }
        }
    }

    async fn next_event_inner(&self, name: Option<&str>) -> Result<NextEventReport, Error> {
        let (events, source) = self.fetch_events(name, None, None, None).await?;
        let next = resolver::next_event(&events, &self.now)?;
        Ok(NextEventReport::success(&next, source))
    }

    /// Room availability, optionally limited to a `start`..`end` window.
    ///
    /// Bounds accept the forms of [`parse_bound`]. A feed day with no
    /// recorded events reads as a free day, not as a failure.
    pub async fn room_availability(
        &self,
        name: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> AvailabilityReport {
        match self.room_availability_inner(name, start, end).await {
            Ok(report) => report,
            Err(Error::Feed(FeedError::Empty)) => AvailabilityReport::all_clear(),
            Err(e) => {
                warn!(error = %e, "availability resolution failed");
                AvailabilityReport::failure(&e)
            }
        }
    }

    async fn room_availability_inner(
        &self,
        name: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<AvailabilityReport, Error> {
        let start = parse_bound(start, &self.now)?;
        let end = parse_bound(end, &self.now)?;
        let (events, _) = self
            .fetch_events(name, Some(Kind::Room), start.as_ref(), end.as_ref())
            .await?;
        let availability =
            resolver::availability(&events, &self.now, start.as_ref(), end.as_ref())?;
        Ok(AvailabilityReport::success(&availability))
    }

    /// Where a professor currently is, or where they will be next.
    pub async fn locate(&self, name: Option<&str>) -> LocateReport {
        match self.locate_inner(name).await {
            Ok(report) => report,
            Err(Error::NoUpcomingEvent | Error::Feed(FeedError::Empty)) => {
                LocateReport::free_all_day()
            }
            Err(e) => {
                warn!(error = %e, "locate resolution failed");
                LocateReport::failure(&e)
            }
        }
    }

    async fn locate_inner(&self, name: Option<&str>) -> Result<LocateReport, Error> {
        let (events, _) = self
            .fetch_events(name, Some(Kind::Professor), None, None)
            .await?;
        Ok(match resolver::next_event(&events, &self.now)? {
            resolver::NextEvent::Ongoing(e) => LocateReport::in_class(&e),
            resolver::NextEvent::Upcoming(e) => LocateReport::free_now(&e),
        })
    }

    /// Resolve, build, fetch, parse: the shared front half of every
    /// operation.
    async fn fetch_events(
        &self,
        name: Option<&str>,
        kind_hint: Option<Kind>,
        start: Option<&Zoned>,
        end: Option<&Zoned>,
    ) -> Result<(Vec<FeedEvent>, PayloadFormat), Error> {
        let record = self.resolve(name, kind_hint)?;
        let query = QueryDescriptor::new(
            record.feed,
            record.kind,
            self.now.date(),
            start.cloned(),
            end.cloned(),
        )?;
        let payload = self.fetcher.fetch(&query).await?;
        let (events, format) = parse(
            &payload.body,
            payload.content_type.as_deref(),
            self.now.time_zone(),
        )?;
        Ok((events, format))
    }

    /// Hinted lookups prefer their kind but fall back to any match, the
    /// way the reference data is actually organized (rooms also appear as
    /// institution timetables).
    fn resolve(
        &self,
        name: Option<&str>,
        kind_hint: Option<Kind>,
    ) -> Result<&ReferenceRecord, Error> {
        let default = self.config.default_timetable.as_deref();
        match self.directory.resolve(name, kind_hint, default) {
            Err(Error::NotFound(_)) if kind_hint.is_some() => {
                self.directory.resolve(name, None, default)
            }
            other => other,
        }
    }
}
