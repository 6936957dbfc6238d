//! CLI command implementations.

pub mod render_cmd;
pub mod validate_cmd;

use anyhow::{Context, Result};
use placard::WidgetOptions;

/// Assemble widget options from CLI flags. `feed_file` content becomes
/// the inline feed (bypassing the fetch), otherwise `feed_url` is used.
pub fn options_from_flags(
    feed_url: Option<&str>,
    feed_file: Option<&str>,
    allowed_domains: &[String],
    division: &str,
    container_id: &str,
    ignore_ordering_hint: bool,
    at: Option<&str>,
    staging_hosts: &[String],
    timeout_ms: u64,
) -> Result<WidgetOptions> {
    let inline_feed = match feed_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read feed file {path}"))?,
        ),
        None => None,
    };

    Ok(WidgetOptions {
        feed_url: feed_url.map(str::to_string),
        inline_feed,
        allowed_domains: allowed_domains.to_vec(),
        current_division: division.to_string(),
        container_id: container_id.to_string(),
        ignore_ordering_hint,
        override_reference_date: at.map(str::to_string),
        staging_hosts: staging_hosts.to_vec(),
        fetch_timeout_ms: timeout_ms,
        ..Default::default()
    })
}
