// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! ADE timetable feed access: query construction, fetching, and decoding of
//! feed payloads (JSON or ICS) into normalized events.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod config;
mod error;
mod event;
mod http;
mod ics;
mod json;
mod parse;
mod query;

pub use crate::config::FeedConfig;
pub use crate::error::FeedError;
pub use crate::event::{FeedEvent, PayloadFormat};
pub use crate::http::{Fetch, HttpFetcher, Payload};
pub use crate::parse::parse;
pub use crate::query::{FeedId, Kind, QueryDescriptor};
