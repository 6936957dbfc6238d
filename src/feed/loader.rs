//! Feed loading: source selection, format detection, memoized single-shot
//! load.
//!
//! The loader fetches (or takes inline) content once per instance. The
//! in-flight/completed outcome is memoized, so concurrent callers join the
//! same load instead of issuing duplicate requests — and a failed load
//! stays failed for the instance's lifetime.

use crate::config::WidgetOptions;
use crate::error::WidgetError;
use crate::feed::xml::XmlOutcome;
use crate::feed::{json, validate, xml, LoadedFeed};
use crate::fetch::FeedFetcher;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Where the feed content comes from.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// Pre-supplied content; bypasses the fetch step.
    Inline(String),
    /// Fetch from this URL.
    Remote(String),
}

/// Detected feed format, dispatched once per load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Xml,
    Json,
}

/// Detect the format from the content itself: a leading declaration or
/// tag-like content means XML, anything else is tried as JSON.
pub fn detect_format(body: &str) -> FeedFormat {
    if body.trim_start().starts_with('<') {
        FeedFormat::Xml
    } else {
        FeedFormat::Json
    }
}

/// Parse a feed body into canonical records, falling back from XML to
/// JSON when the content turned out not to be XML at all.
pub fn parse_feed_body(body: &str) -> Result<Vec<Value>, WidgetError> {
    match detect_format(body) {
        FeedFormat::Xml => match xml::parse_xml_feed(body) {
            XmlOutcome::Records(records) => Ok(records),
            XmlOutcome::MissingDisclaimers => Err(WidgetError::MalformedFeed(
                "missing disclaimers".to_string(),
            )),
            XmlOutcome::NotXml(xml_err) => json::parse_json_feed(body).map_err(|_| {
                WidgetError::MalformedFeed(format!(
                    "content is neither well-formed XML ({xml_err}) nor JSON"
                ))
            }),
        },
        FeedFormat::Json => json::parse_json_feed(body),
    }
}

/// Loads and caches the disclaimer feed for one widget instance.
#[derive(Debug)]
pub struct FeedLoader {
    source: FeedSource,
    fetcher: FeedFetcher,
    allowed_domains: Vec<String>,
    loaded: OnceCell<Result<Arc<LoadedFeed>, WidgetError>>,
}

impl FeedLoader {
    /// Build a loader from widget options. Inline content wins over a
    /// configured URL; having neither is a configuration error.
    pub fn from_options(options: &WidgetOptions) -> Result<Self, WidgetError> {
        let source = if let Some(content) = &options.inline_feed {
            FeedSource::Inline(content.clone())
        } else if let Some(url) = &options.feed_url {
            FeedSource::Remote(url.clone())
        } else {
            return Err(WidgetError::BadOption(
                "neither inlineFeed nor feedUrl is set".to_string(),
            ));
        };

        Ok(Self {
            source,
            fetcher: FeedFetcher::new(options.fetch_timeout_ms),
            allowed_domains: options.allowed_domains.clone(),
            loaded: OnceCell::new(),
        })
    }

    /// Load the feed. Idempotent: repeated and concurrent calls share the
    /// first load's outcome without re-fetching.
    pub async fn load(&self) -> Result<Arc<LoadedFeed>, WidgetError> {
        self.loaded
            .get_or_init(|| async { self.load_inner().await })
            .await
            .clone()
    }

    async fn load_inner(&self) -> Result<Arc<LoadedFeed>, WidgetError> {
        let body = match &self.source {
            FeedSource::Inline(content) => content.clone(),
            FeedSource::Remote(url) => {
                info!(url = %url, "fetching disclaimer feed");
                self.fetcher.fetch_text(url).await?
            }
        };

        let records = parse_feed_body(&body)?;
        let (feed, invalid_ids) = validate::process_disclaimers(&records, &self.allowed_domains);
        if !invalid_ids.is_empty() {
            warn!(
                dropped = invalid_ids.len(),
                "feed loaded with invalid records dropped"
            );
        }
        info!(records = feed.len(), "disclaimer feed ready");

        Ok(Arc::new(LoadedFeed { feed, invalid_ids }))
    }
}
