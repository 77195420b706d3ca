// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Local reference data and identity resolution.

use edtcal_ade::{FeedId, Kind};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;

/// Aliases a caller may use to mean "my own timetable".
const SELF_ALIASES: [&str; 3] = ["me", "moi", "self"];

/// One reference entry: a display name bound to a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    /// Name the entry is looked up by.
    pub display_name: String,

    /// What kind of resource the entry is.
    pub kind: Kind,

    /// Feed the entry's timetable lives in.
    pub feed: FeedId,
}

/// Read-only snapshot of the reference collections.
///
/// Loaded once at startup and never mutated, so it can be shared freely
/// between concurrent resolution calls.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    records: Vec<ReferenceRecord>,
}

impl Directory {
    /// Builds a directory from ordered records.
    #[must_use]
    pub fn new(records: Vec<ReferenceRecord>) -> Self {
        Self { records }
    }

    /// Loads the four ADE reference documents, in the search order used
    /// for unhinted lookups: professors, students, rooms, institutions.
    ///
    /// `prof.json`, `student.json` and `salle.json` share the shape
    /// `{"<key>": [{"descTT": ..., "adeProjectId": ..., "adeResources": ...}]}`;
    /// `univ.json` nests timetable entries under each institution. Entries
    /// missing either feed-id component cannot be queried and are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reference`] when a document is not valid JSON or
    /// lacks its collection key.
    pub fn from_reference_json(
        prof: &str,
        student: &str,
        salle: &str,
        univ: &str,
    ) -> Result<Self, Error> {
        let mut records = Vec::new();
        collect_flat(prof, "prof", Kind::Professor, &mut records)?;
        collect_flat(student, "student", Kind::Student, &mut records)?;
        collect_flat(salle, "salle", Kind::Room, &mut records)?;
        collect_univ(univ, &mut records)?;
        Ok(Self { records })
    }

    /// The records in definition order.
    #[must_use]
    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    /// Resolves a free-form name to a reference record.
    ///
    /// An empty name or a self alias falls back to `default_name`; with no
    /// default configured this is [`Error::NoIdentityConfigured`]. Matching
    /// is two-pass: exact case-insensitive on the display name first, then
    /// accent-folded whitespace-normalized substring. Within a pass the
    /// first record in definition order wins, which makes resolution
    /// deterministic rather than "best match". A kind hint restricts the
    /// search to that kind's collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when both passes come up empty.
    pub fn resolve(
        &self,
        name: Option<&str>,
        kind_hint: Option<Kind>,
        default_name: Option<&str>,
    ) -> Result<&ReferenceRecord, Error> {
        let name = match name.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) if !is_self_alias(s) => s,
            _ => default_name.ok_or(Error::NoIdentityConfigured)?,
        };

        let candidates = || {
            self.records
                .iter()
                .filter(move |r| kind_hint.is_none_or(|k| r.kind == k))
        };

        let exact = name.to_lowercase();
        if let Some(record) = candidates().find(|r| r.display_name.to_lowercase() == exact) {
            return Ok(record);
        }

        let needle = fold(name);
        candidates()
            .find(|r| fold(&r.display_name).contains(&needle))
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

fn is_self_alias(s: &str) -> bool {
    SELF_ALIASES.iter().any(|a| s.eq_ignore_ascii_case(a))
}

fn collect_flat(
    json: &str,
    key: &str,
    kind: Kind,
    out: &mut Vec<ReferenceRecord>,
) -> Result<(), Error> {
    let value: Value = serde_json::from_str(json).map_err(|e| Error::Reference(e.to_string()))?;
    let Some(items) = value.get(key).and_then(Value::as_array) else {
        return Err(Error::Reference(format!("missing \"{key}\" collection")));
    };
    for item in items {
        push_entry(item, kind, out);
    }
    Ok(())
}

fn collect_univ(json: &str, out: &mut Vec<ReferenceRecord>) -> Result<(), Error> {
    let value: Value = serde_json::from_str(json).map_err(|e| Error::Reference(e.to_string()))?;
    let Some(items) = value.get("univ").and_then(Value::as_array) else {
        return Err(Error::Reference("missing \"univ\" collection".to_string()));
    };
    for univ in items {
        let Some(timetables) = univ.get("timetable").and_then(Value::as_array) else {
            continue;
        };
        for item in timetables {
            push_entry(item, Kind::Institution, out);
        }
    }
    Ok(())
}

fn push_entry(item: &Value, kind: Kind, out: &mut Vec<ReferenceRecord>) {
    let Some(name) = item
        .get("descTT")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return;
    };
    let (Some(project), Some(resource)) = (integer(item, "adeProjectId"), integer(item, "adeResources"))
    else {
        warn!(name, ?kind, "reference entry has no feed identity, skipping");
        return;
    };
    out.push(ReferenceRecord {
        display_name: name.to_string(),
        kind,
        feed: FeedId { project, resource },
    });
}

/// Feed ids occasionally arrive as strings in the reference files.
fn integer(item: &Value, key: &str) -> Option<i64> {
    match item.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lowercases, strips common French diacritics and collapses whitespace.
fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}
