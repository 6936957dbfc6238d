//! Disclaimer record model and the immutable feed container.
//!
//! Both the JSON and XML parsers converge on a canonical representation
//! (`Vec<serde_json::Value>` records); validation turns those into typed
//! [`Disclaimer`] values and a [`Feed`] preserving original feed order.

pub mod json;
pub mod loader;
pub mod validate;
pub mod xml;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Canonical date grammar for `startDate`/`endDate` and the reference-date
/// override. Interpreted as UTC.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a feed timestamp under the canonical grammar.
pub fn parse_feed_date(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}

/// One validated disclaimer record. Text fields are stored normalized
/// (markup-escaped, whitespace-collapsed) and the body already carries
/// anchor markup from linkification.
#[derive(Debug, Clone, Serialize)]
pub struct Disclaimer {
    /// Unique key within the feed (integer ids stringified).
    pub id: String,
    /// Numeric ordering hint from `index`/`apex`.
    pub order_hint: Option<i64>,
    /// Escaped, whitespace-normalized heading text.
    pub title: String,
    /// Normalized body with embedded URLs converted to anchors.
    pub body: String,
    /// Page URLs this disclaimer applies to. Empty means everywhere.
    pub urls: Vec<String>,
    /// Uppercased division tag; `None` applies to all divisions.
    pub division: Option<String>,
    /// Activation lower bound; `None` is unbounded below.
    pub starts_at: Option<DateTime<Utc>>,
    /// Activation upper bound; `None` is unbounded above.
    pub ends_at: Option<DateTime<Utc>>,
}

/// The full validated feed: records in original feed order plus an
/// id lookup. Built once per loader instance, immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    records: Vec<Disclaimer>,
    by_id: HashMap<String, usize>,
}

impl Feed {
    /// Append a record. Returns false (and leaves the feed unchanged)
    /// when the id is already taken — ids are unique across the feed.
    pub(crate) fn insert(&mut self, record: Disclaimer) -> bool {
        if self.by_id.contains_key(&record.id) {
            return false;
        }
        self.by_id.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    /// Records in original feed order.
    pub fn records(&self) -> &[Disclaimer] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Disclaimer> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A loaded feed plus the validation diagnostics that rode along with it.
#[derive(Debug, Clone, Default)]
pub struct LoadedFeed {
    pub feed: Feed,
    /// Ids of records dropped by validation (`"unknown"` when the record
    /// had no usable id).
    pub invalid_ids: Vec<String>,
}
