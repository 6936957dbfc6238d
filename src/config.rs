//! Constructor-time widget configuration.

use serde::Deserialize;

/// Default id of the container element the renderer writes into.
pub const DEFAULT_CONTAINER_ID: &str = "disclaimer-container";

/// Default per-request fetch timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// All options accepted at widget construction time.
///
/// Deserializable so deployments can keep the whole thing in a JSON file;
/// the CLI also assembles one from flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    /// URL of the disclaimer feed. Ignored when `inline_feed` is set.
    pub feed_url: Option<String>,
    /// Pre-supplied feed content (JSON or XML). Bypasses the fetch step;
    /// intended for tests and staging previews.
    pub inline_feed: Option<String>,
    /// Host patterns the widget is allowed to run against. Matching is
    /// substring containment in both directions. Empty means no host
    /// restriction.
    pub allowed_domains: Vec<String>,
    /// Comma-separated division allow-list, e.g. `"MX,AV"`. `"ALL"`
    /// matches every record.
    pub current_division: String,
    /// Id of the container the renderer writes into.
    pub container_id: String,
    /// When true, hint-based ordering is disabled and eligible records
    /// are numbered sequentially in post-filter order.
    pub ignore_ordering_hint: bool,
    /// Reference-date override in the canonical `YYYY-MM-DD HH:MM:SS`
    /// grammar. Only honored when the page host is in `staging_hosts`.
    pub override_reference_date: Option<String>,
    /// Hosts on which `override_reference_date` is honored. Production
    /// hosts always use real current time.
    pub staging_hosts: Vec<String>,
    /// Per-request feed fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
    /// When true, a leading locale path segment (`it`, `en-us`, ...) is
    /// stripped during URL-match normalization.
    pub strip_locale_segment: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            feed_url: None,
            inline_feed: None,
            allowed_domains: Vec::new(),
            current_division: "ALL".to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            ignore_ordering_hint: false,
            override_reference_date: None,
            staging_hosts: Vec::new(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            strip_locale_segment: false,
        }
    }
}

impl WidgetOptions {
    /// Parse `current_division` into a normalized set: comma-split,
    /// whitespace-stripped, uppercased, empty entries dropped.
    pub fn division_set(&self) -> Vec<String> {
        self.current_division
            .split(',')
            .map(|d| d.trim().to_uppercase())
            .filter(|d| !d.is_empty())
            .collect()
    }
}
