// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! ICS calendar-stream decoding.
//!
//! The ADE endpoints emit flat VEVENT blocks without nesting or recurrence,
//! so this is a line-oriented scan rather than a full iCalendar grammar.

use jiff::tz::TimeZone;
use jiff::{Span, Zoned};
use jiff::civil::Date;

use crate::event::FeedEvent;
use crate::parse::{Decoded, parse_feed_datetime};

pub(crate) fn decode(text: &str, tz: &TimeZone) -> Result<Decoded, String> {
    let unfolded = unfold(text);
    let mut out = Decoded::default();
    let mut block: Option<Block> = None;
    let mut seen = false;

    for line in unfolded.lines() {
        let line = line.trim_end_matches('\r');
        if line == "BEGIN:VEVENT" {
            seen = true;
            block = Some(Block::default());
            continue;
        }
        if line == "END:VEVENT" {
            if let Some(b) = block.take() {
                match b.into_event(tz) {
                    Some(event) => out.events.push(event),
                    None => out.skipped += 1,
                }
            }
            continue;
        }
        let Some(b) = block.as_mut() else { continue };
        if let Some(v) = property(line, "DTSTART") {
            b.start = Some(v.to_string());
        } else if let Some(v) = property(line, "DTEND") {
            b.end = Some(v.to_string());
        } else if let Some(v) = property(line, "SUMMARY") {
            b.summary = Some(unescape(v));
        } else if let Some(v) = property(line, "LOCATION") {
            b.location = Some(unescape(v));
        }
    }

    if !seen {
        return Err("no VEVENT block found".to_string());
    }
    Ok(out)
}

#[derive(Debug, Default)]
struct Block {
    start: Option<String>,
    end: Option<String>,
    summary: Option<String>,
    location: Option<String>,
}

impl Block {
    fn into_event(self, tz: &TimeZone) -> Option<FeedEvent> {
        let raw_start = self.start?;
        let all_day = is_date_only(&raw_start);
        let start = parse_value(&raw_start, tz)?;

        // All-day and open-ended blocks get a one-hour duration.
        let end = if all_day {
            None
        } else {
            self.end.as_deref().and_then(|v| parse_value(v, tz))
        };
        let end = match end {
            Some(end) => end,
            None => start.checked_add(Span::new().hours(1)).ok()?,
        };

        let location = self.location.filter(|s| !s.is_empty());
        FeedEvent::new(start, end, self.summary.unwrap_or_default(), location)
    }
}

fn parse_value(v: &str, tz: &TimeZone) -> Option<Zoned> {
    let v = v.trim();
    if is_date_only(v) {
        let date = Date::strptime("%Y%m%d", v).ok()?;
        return date.at(0, 0, 0, 0).to_zoned(tz.clone()).ok();
    }
    parse_feed_datetime(v, tz)
}

fn is_date_only(v: &str) -> bool {
    v.len() == 8 && v.bytes().all(|b| b.is_ascii_digit())
}

/// Matches a content line against a property name, tolerating parameters
/// (`DTSTART;TZID=...:value`) and returning the value part.
fn property<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    let (params, value) = rest.split_once(':')?;
    (params.is_empty() || params.starts_with(';')).then_some(value)
}

/// Joins folded content lines (CRLF followed by a space or tab).
fn unfold(text: &str) -> String {
    text.replace("\r\n ", "")
        .replace("\r\n\t", "")
        .replace("\n ", "")
        .replace("\n\t", "")
}

fn unescape(v: &str) -> String {
    v.trim()
        .replace("\\n", " ")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn utc() -> TimeZone {
        TimeZone::UTC
    }

    fn decode_one(ics: &str) -> FeedEvent {
        let decoded = decode(ics, &utc()).unwrap();
        assert_eq!(decoded.events.len(), 1);
        decoded.events.into_iter().next().unwrap()
    }

    #[test]
    fn decode_reads_vevent_block() {
        let event = decode_one(
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             BEGIN:VEVENT\r\n\
             UID:1@edt\r\n\
             DTSTART:20251025T080000\r\n\
             DTEND:20251025T100000\r\n\
             SUMMARY:Analyse\r\n\
             LOCATION:S3 057\r\n\
             END:VEVENT\r\n\
             END:VCALENDAR\r\n",
        );
        assert_eq!(event.start, date(2025, 10, 25).at(8, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap());
        assert_eq!(event.end, date(2025, 10, 25).at(10, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap());
        assert_eq!(event.summary, "Analyse");
        assert_eq!(event.location.as_deref(), Some("S3 057"));
    }

    #[test]
    fn decode_normalizes_all_day_block_to_one_hour() {
        let event = decode_one(
            "BEGIN:VEVENT\r\n\
             DTSTART;VALUE=DATE:20251025\r\n\
             DTEND;VALUE=DATE:20251026\r\n\
             SUMMARY:Journée portes ouvertes\r\n\
             END:VEVENT\r\n",
        );
        assert_eq!(event.start, date(2025, 10, 25).at(0, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap());
        assert_eq!(event.end, date(2025, 10, 25).at(1, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap());
    }

    #[test]
    fn decode_defaults_open_ended_block_to_one_hour() {
        let event = decode_one(
            "BEGIN:VEVENT\r\n\
             DTSTART:20251025T140000\r\n\
             SUMMARY:Soutenance\r\n\
             END:VEVENT\r\n",
        );
        assert_eq!(event.end, date(2025, 10, 25).at(15, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap());
    }

    #[test]
    fn decode_unfolds_continuation_lines() {
        let event = decode_one(
            "BEGIN:VEVENT\r\n\
             DTSTART:20251025T080000\r\n\
             DTEND:20251025T100000\r\n\
             SUMMARY:Analyse numé\r\n rique\\, TD\r\n\
             END:VEVENT\r\n",
        );
        assert_eq!(event.summary, "Analyse numérique, TD");
    }

    #[test]
    fn decode_skips_block_without_start() {
        let decoded = decode(
            "BEGIN:VEVENT\r\n\
             SUMMARY:fantôme\r\n\
             END:VEVENT\r\n",
            &utc(),
        )
        .unwrap();
        assert!(decoded.events.is_empty());
        assert_eq!(decoded.skipped, 1);
    }

    #[test]
    fn decode_requires_a_vevent_block() {
        assert!(decode("hello world", &utc()).is_err());
    }

    #[test]
    fn dtstamp_is_not_mistaken_for_dtstart() {
        assert!(property("DTSTAMP:20251025T080000", "DTSTART").is_none());
        assert_eq!(
            property("DTSTART;TZID=Europe/Paris:20251025T080000", "DTSTART"),
            Some("20251025T080000")
        );
    }
}
