// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Payload format sniffing and dispatch.

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use tracing::debug;

use crate::error::FeedError;
use crate::event::{FeedEvent, PayloadFormat};
use crate::{ics, json};

/// Outcome of a single decode attempt: surviving events plus the number of
/// records dropped as malformed or zero-duration.
#[derive(Debug, Default)]
pub(crate) struct Decoded {
    pub events: Vec<FeedEvent>,
    pub skipped: usize,
}

/// Decodes a fetched payload into normalized events.
///
/// The declared content type, or failing that the payload's first
/// non-whitespace byte, picks which format is tried first; the other
/// format is tried once if the first cannot be decoded at all. Naive feed
/// timestamps are interpreted in `tz`.
///
/// The returned events are sorted ascending by start time (ties keep feed
/// order) and contain no zero-duration entries.
///
/// # Errors
///
/// Returns [`FeedError::Unparseable`] when both formats fail to decode,
/// and [`FeedError::Empty`] when decoding succeeds but no usable event
/// remains. The two are distinct: an empty day is not a malformed payload.
pub fn parse(
    payload: &[u8],
    content_type: Option<&str>,
    tz: &TimeZone,
) -> Result<(Vec<FeedEvent>, PayloadFormat), FeedError> {
    let text = String::from_utf8_lossy(payload);
    let first = sniff(&text, content_type);

    let (decoded, format) = attempt(&text, first, tz).or_else(|primary| {
        attempt(&text, first.other(), tz)
            .map_err(|fallback| FeedError::Unparseable(format!("{primary}; {fallback}")))
    })?;

    if decoded.skipped > 0 {
        debug!(skipped = decoded.skipped, "dropped malformed feed records");
    }

    let mut events = decoded.events;
    events.sort_by(|a, b| a.start.cmp(&b.start));
    if events.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok((events, format))
}

fn attempt(
    text: &str,
    format: PayloadFormat,
    tz: &TimeZone,
) -> Result<(Decoded, PayloadFormat), String> {
    match format {
        PayloadFormat::Json => json::decode(text, tz)
            .map(|d| (d, format))
            .map_err(|e| format!("json: {e}")),
        PayloadFormat::Ics => ics::decode(text, tz)
            .map(|d| (d, format))
            .map_err(|e| format!("ics: {e}")),
    }
}

/// A structured-looking first byte decides before the declared content
/// type does; endpoints have been seen labelling JSON as `text/calendar`.
fn sniff(text: &str, content_type: Option<&str>) -> PayloadFormat {
    if matches!(text.trim_start().as_bytes().first(), Some(b'{' | b'[')) {
        return PayloadFormat::Json;
    }
    match content_type {
        Some(ct) if ct.to_ascii_lowercase().contains("json") => PayloadFormat::Json,
        _ => PayloadFormat::Ics,
    }
}

/// Parses a feed timestamp: the ADE compact form (`20251025T080000`,
/// optionally `Z`-suffixed or without seconds) or ISO-8601 with or without
/// an offset.
pub(crate) fn parse_feed_datetime(s: &str, tz: &TimeZone) -> Option<Zoned> {
    let s = s.trim();
    let (compact, utc) = match s.strip_suffix('Z') {
        Some(rest) if !rest.contains(['+', '-']) => (rest, true),
        _ => (s, false),
    };
    for fmt in ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M"] {
        if let Ok(dt) = DateTime::strptime(fmt, compact) {
            let tz = if utc { TimeZone::UTC } else { tz.clone() };
            return dt.to_zoned(tz).ok();
        }
    }
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts.to_zoned(tz.clone()));
    }
    s.parse::<DateTime>().ok()?.to_zoned(tz.clone()).ok()
}
