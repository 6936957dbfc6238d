//! Ordering and HTML emission for eligible disclaimers.

use crate::feed::Disclaimer;
use crate::page::HostPage;
use serde::Serialize;
use std::cmp::Ordering;

/// Result of a render pass. `failed` stays empty in normal operation:
/// validation already removed malformed input, and pipeline-level errors
/// abort the render entirely instead of failing per item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderOutcome {
    pub success: Vec<String>,
    pub failed: Vec<String>,
}

/// Order eligible records for rendering.
///
/// Stable sort by ordering hint ascending; records without a hint sort
/// after records that have one; ties keep feed order. With
/// `ignore_ordering_hint` the post-filter order is kept as-is.
pub fn order_records<'a>(
    mut records: Vec<&'a Disclaimer>,
    ignore_ordering_hint: bool,
) -> Vec<&'a Disclaimer> {
    if !ignore_ordering_hint {
        records.sort_by(|a, b| match (a.order_hint, b.order_hint) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
    records
}

/// Write the ordered records into the named container, clearing prior
/// content first. Returns the ids rendered, in render order.
///
/// Each record emits a heading and a numbered body paragraph. The body's
/// anchor markup (from linkification) is emitted as live markup.
pub fn render_into(
    page: &mut HostPage,
    container_id: &str,
    records: &[&Disclaimer],
    ignore_ordering_hint: bool,
) -> Vec<String> {
    let mut html = String::new();
    let mut rendered = Vec::with_capacity(records.len());

    for (pos, record) in records.iter().enumerate() {
        let label = if ignore_ordering_hint {
            (pos + 1).to_string()
        } else {
            record
                .order_hint
                .map(|h| h.to_string())
                .unwrap_or_else(|| record.id.clone())
        };

        if !record.title.is_empty() {
            html.push_str(&format!("<h3>{}</h3>\n", record.title));
        }
        html.push_str(&format!(
            "<p><strong>{label}.</strong> {}</p>\n",
            record.body
        ));
        rendered.push(record.id.clone());
    }

    page.set_container(container_id, html);
    rendered
}
