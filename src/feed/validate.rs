//! Per-record validation and the batch partition into a feed.
//!
//! `validate` is a pure predicate over the canonical record shape; it
//! never panics and never mutates its input. Invalid records are a local,
//! recoverable condition: the batch partition drops them, collects their
//! ids for diagnostics, and the feed loads with whatever survived.

use crate::feed::{parse_feed_date, Disclaimer, Feed};
use crate::text;
use serde_json::Value;
use tracing::warn;
use url::Url;

/// Check one canonical record against the schema contract.
///
/// Required fields: `id`, `index`, `title`, `text`, `urls`. See
/// [`convert`] for the exact shape rules.
pub fn validate(record: &Value, allowed_domains: &[String]) -> bool {
    convert(record, allowed_domains).is_some()
}

/// Convert one canonical record into a validated [`Disclaimer`].
///
/// Returns `None` when any rule fails:
/// - `id` must be a string or an integer;
/// - `index` (alias `apex`) must be an integer or an integer string;
/// - `title` and `text` must be non-empty strings after normalization;
/// - `urls` must be a non-empty array of http(s) URLs whose hosts pass
///   the domain allow-list (an empty allow-list accepts any host);
/// - `div`, if present, must be a string ("ALL" means all divisions);
/// - `startDate`/`endDate`, if present, must parse under the canonical
///   grammar, and `startDate <= endDate` when both are given.
///
/// Text normalization happens here so stored records are render-ready:
/// the title is escaped, the body is escaped and then linkified.
pub fn convert(record: &Value, allowed_domains: &[String]) -> Option<Disclaimer> {
    let obj = record.as_object()?;

    let id = match obj.get("id")? {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        _ => return None,
    };

    let order_hint = match obj.get("index").or_else(|| obj.get("apex"))? {
        Value::Number(n) => Some(n.as_i64()?),
        Value::String(s) => Some(s.trim().parse::<i64>().ok()?),
        _ => return None,
    };

    let title = text::normalize_text(obj.get("title")?.as_str()?);
    if title.is_empty() {
        return None;
    }

    let body = text::normalize_text(obj.get("text")?.as_str()?);
    if body.is_empty() {
        return None;
    }
    let body = text::convert_urls_to_anchors(&body);

    let urls = obj.get("urls")?.as_array()?;
    if urls.is_empty() {
        return None;
    }
    let mut checked_urls = Vec::with_capacity(urls.len());
    for u in urls {
        let s = u.as_str()?;
        if !url_shape_permitted(s, allowed_domains) {
            return None;
        }
        checked_urls.push(s.to_string());
    }

    let division = match obj.get("div").or_else(|| obj.get("division")) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let d = s.trim().to_uppercase();
            if d.is_empty() || d == "ALL" {
                None
            } else {
                Some(d)
            }
        }
        Some(_) => return None,
    };

    let starts_at = match obj.get("startDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(parse_feed_date(s)?),
        Some(_) => return None,
    };
    let ends_at = match obj.get("endDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(parse_feed_date(s)?),
        Some(_) => return None,
    };
    // A reversed range can never be active; treat it as a data error.
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if start > end {
            return None;
        }
    }

    Some(Disclaimer {
        id,
        order_hint,
        title,
        body,
        urls: checked_urls,
        division,
        starts_at,
        ends_at,
    })
}

/// Permitted URL shape: http(s) scheme, a host, and a host accepted by
/// the allow-list (substring containment, either direction).
fn url_shape_permitted(s: &str, allowed_domains: &[String]) -> bool {
    let Ok(u) = Url::parse(s) else {
        return false;
    };
    if u.scheme() != "http" && u.scheme() != "https" {
        return false;
    }
    let Some(host) = u.host_str() else {
        return false;
    };
    crate::eligibility::host_allowed(host, allowed_domains)
}

/// Partition a batch of canonical records into the validated feed and the
/// ids of the records that were dropped.
///
/// A record whose id duplicates an earlier one is rejected (first
/// occurrence wins). Dropped records without a usable id report as
/// `"unknown"`.
pub fn process_disclaimers(
    records: &[Value],
    allowed_domains: &[String],
) -> (Feed, Vec<String>) {
    let mut feed = Feed::default();
    let mut invalid_ids = Vec::new();

    for record in records {
        match convert(record, allowed_domains) {
            Some(disclaimer) => {
                let id = disclaimer.id.clone();
                if !feed.insert(disclaimer) {
                    warn!(id = %id, "duplicate disclaimer id dropped");
                    invalid_ids.push(id);
                }
            }
            None => {
                let id = record_id_for_diagnostics(record);
                warn!(id = %id, "disclaimer failed validation, dropped");
                invalid_ids.push(id);
            }
        }
    }

    (feed, invalid_ids)
}

fn record_id_for_diagnostics(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unknown".to_string(),
    }
}
