// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structured (JSON) payload decoding.
//!
//! The update endpoint answers with a date-keyed map
//! `{ "YYYY-MM-DD": { "content": [ ... ], "lastUpdate": ... } }`; a flat
//! array of event records is accepted as well. Records missing a start or
//! an end are skipped, not fatal.

use jiff::tz::TimeZone;
use serde_json::Value;

use crate::event::FeedEvent;
use crate::parse::{Decoded, parse_feed_datetime};

pub(crate) fn decode(text: &str, tz: &TimeZone) -> Result<Decoded, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

    let mut out = Decoded::default();
    match &value {
        Value::Array(records) => {
            for record in records {
                push_record(record, tz, &mut out);
            }
        }
        Value::Object(days) => {
            for day in days.values() {
                let Some(content) = day.get("content").and_then(Value::as_array) else {
                    continue;
                };
                for record in content {
                    push_record(record, tz, &mut out);
                }
            }
        }
        _ => return Err("expected an array or object at top level".to_string()),
    }
    Ok(out)
}

fn push_record(record: &Value, tz: &TimeZone, out: &mut Decoded) {
    match decode_record(record, tz) {
        Some(event) => out.events.push(event),
        None => out.skipped += 1,
    }
}

fn decode_record(record: &Value, tz: &TimeZone) -> Option<FeedEvent> {
    let start = parse_feed_datetime(field(record, &["DTSTART", "start"])?, tz)?;
    let end = parse_feed_datetime(field(record, &["DTEND", "end"])?, tz)?;
    let summary = field(record, &["SUMMARY", "summary"])
        .unwrap_or_default()
        .trim()
        .to_string();
    let location = field(record, &["LOCATION", "location", "room"])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    FeedEvent::new(start, end, summary, location)
}

fn field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| record.get(k).and_then(Value::as_str))
}
