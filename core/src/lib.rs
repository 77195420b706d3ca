// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Timetable resolution engine: maps a free-form name to an ADE feed,
//! queries it through a fetch collaborator and derives next-event and
//! room-availability answers.

mod config;
mod datetime;
mod directory;
mod edt;
mod error;
mod report;
mod resolver;

pub use edtcal_ade::{
    Fetch, FeedConfig, FeedError, FeedEvent, FeedId, HttpFetcher, Kind, Payload, PayloadFormat,
    QueryDescriptor,
};

pub use crate::config::Config;
pub use crate::datetime::parse_bound;
pub use crate::directory::{Directory, ReferenceRecord};
pub use crate::edt::Edt;
pub use crate::error::Error;
pub use crate::report::{
    AvailabilityReport, LocateReport, LocateStatus, NextEventReport, NextEventView,
};
pub use crate::resolver::{Availability, NextEvent, availability, next_event};
