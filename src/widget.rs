//! The disclaimer widget: per-instance state and the render entry point.
//!
//! One instance owns one feed cache and one executed flag; independent
//! instances coexist without interference. The whole pipeline runs as a
//! single asynchronous sequence — the feed load is the only suspension
//! point.

use crate::config::WidgetOptions;
use crate::eligibility;
use crate::error::WidgetError;
use crate::feed::loader::FeedLoader;
use crate::feed::{parse_feed_date, Disclaimer, LoadedFeed};
use crate::page::HostPage;
use crate::render::{self, RenderOutcome};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// A single disclaimer widget instance.
pub struct DisclaimerWidget {
    options: WidgetOptions,
    loader: FeedLoader,
    executed: AtomicBool,
}

impl DisclaimerWidget {
    /// Create a widget. Fails when the options name no feed source.
    pub fn new(options: WidgetOptions) -> Result<Self, WidgetError> {
        let loader = FeedLoader::from_options(&options)?;
        Ok(Self {
            options,
            loader,
            executed: AtomicBool::new(false),
        })
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Load (or join) the cached feed without rendering. Exposes the
    /// validation diagnostics; used by the CLI `validate` command.
    pub async fn load_feed(&self) -> Result<Arc<LoadedFeed>, WidgetError> {
        self.loader.load().await
    }

    /// The externally invoked operation: load, filter, and render the
    /// eligible disclaimers into the page's configured container.
    ///
    /// One-shot per instance: a second invocation — concurrent with or
    /// after the first — fails fast with [`WidgetError::AlreadyExecuted`]
    /// and leaves the page untouched. Pipeline-level failures (transport,
    /// malformed feed) abort before any container mutation.
    pub async fn insert_page_contents(
        &self,
        page: &mut HostPage,
    ) -> Result<RenderOutcome, WidgetError> {
        if self.executed.swap(true, Ordering::SeqCst) {
            return Err(WidgetError::AlreadyExecuted);
        }

        let loaded = self.loader.load().await?;
        let page_url = Url::parse(page.url())
            .map_err(|e| WidgetError::BadOption(format!("invalid page URL: {e}")))?;

        let reference = self.reference_instant(&page_url);
        let division_set = self.options.division_set();

        let eligible: Vec<&Disclaimer> = loaded
            .feed
            .records()
            .iter()
            .filter(|r| {
                eligibility::is_eligible(r, &page_url, reference, &self.options, &division_set)
            })
            .collect();

        let ordered = render::order_records(eligible, self.options.ignore_ordering_hint);
        let success = render::render_into(
            page,
            &self.options.container_id,
            &ordered,
            self.options.ignore_ordering_hint,
        );

        info!(
            rendered = success.len(),
            container = %self.options.container_id,
            "render pass complete"
        );
        Ok(RenderOutcome {
            success,
            failed: Vec::new(),
        })
    }

    /// Reference instant for the date predicate: real current time, unless
    /// an override is configured and the page host is in the staging
    /// allow-list. Production hosts always use real current time.
    fn reference_instant(&self, page_url: &Url) -> DateTime<Utc> {
        if let Some(raw) = &self.options.override_reference_date {
            let host = page_url.host_str().unwrap_or("");
            let on_staging = !self.options.staging_hosts.is_empty()
                && eligibility::host_allowed(host, &self.options.staging_hosts);
            if on_staging {
                match parse_feed_date(raw) {
                    Some(dt) => return dt,
                    None => {
                        warn!(value = %raw, "unparseable reference-date override ignored")
                    }
                }
            }
        }
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DIVISION_FEED: &str = r#"{"disclaimers": [
        {"id": "a", "index": 1, "title": "For MX", "text": "mx body",
         "urls": ["https://host/it/page/"], "div": "MX",
         "startDate": "2000-01-01 00:00:00", "endDate": "2999-12-31 23:59:59"},
        {"id": "b", "index": 2, "title": "For AV", "text": "av body",
         "urls": ["https://host/it/page/"], "div": "AV"}
    ]}"#;

    fn widget(division: &str) -> DisclaimerWidget {
        DisclaimerWidget::new(WidgetOptions {
            inline_feed: Some(TWO_DIVISION_FEED.to_string()),
            allowed_domains: vec!["host".to_string()],
            current_division: division.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_division_scenario() {
        let w = widget("MX");
        let mut page = HostPage::new("https://host/it/page.html");
        let outcome = w.insert_page_contents(&mut page).await.unwrap();

        assert_eq!(outcome.success, vec!["a".to_string()]);
        assert!(outcome.failed.is_empty());

        let html = page
            .container_html(crate::config::DEFAULT_CONTAINER_ID)
            .unwrap();
        assert!(html.contains("For MX"));
        assert!(!html.contains("For AV"));
    }

    #[tokio::test]
    async fn test_second_invocation_fails_fast() {
        let w = widget("ALL");
        let mut page = HostPage::new("https://host/it/page.html");
        w.insert_page_contents(&mut page).await.unwrap();
        let after_first = page
            .container_html(crate::config::DEFAULT_CONTAINER_ID)
            .unwrap()
            .to_string();

        let err = w.insert_page_contents(&mut page).await.unwrap_err();
        assert!(matches!(err, WidgetError::AlreadyExecuted));
        assert_eq!(
            page.container_html(crate::config::DEFAULT_CONTAINER_ID),
            Some(after_first.as_str())
        );
    }

    #[tokio::test]
    async fn test_independent_instances_coexist() {
        let w1 = widget("MX");
        let w2 = widget("AV");
        let mut p1 = HostPage::new("https://host/it/page.html");
        let mut p2 = HostPage::new("https://host/it/page.html");

        let o1 = w1.insert_page_contents(&mut p1).await.unwrap();
        let o2 = w2.insert_page_contents(&mut p2).await.unwrap();
        assert_eq!(o1.success, vec!["a".to_string()]);
        assert_eq!(o2.success, vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_override_date_only_on_staging_hosts() {
        let base = WidgetOptions {
            inline_feed: Some(TWO_DIVISION_FEED.to_string()),
            allowed_domains: vec!["host".to_string()],
            // Before record "a"'s start date.
            override_reference_date: Some("1990-01-01 00:00:00".to_string()),
            staging_hosts: vec!["host".to_string()],
            ..Default::default()
        };

        // On the staging host the override applies: record "a" is not yet
        // active, only the unbounded record "b" renders.
        let w = DisclaimerWidget::new(base.clone()).unwrap();
        let mut page = HostPage::new("https://host/it/page.html");
        let outcome = w.insert_page_contents(&mut page).await.unwrap();
        assert_eq!(outcome.success, vec!["b".to_string()]);

        // Same options but the page host is not a staging host: real
        // current time is used and both records are active.
        let w = DisclaimerWidget::new(WidgetOptions {
            staging_hosts: vec!["preview.internal".to_string()],
            allowed_domains: vec!["host".to_string()],
            ..base
        })
        .unwrap();
        let mut page = HostPage::new("https://host/it/page.html");
        let outcome = w.insert_page_contents(&mut page).await.unwrap();
        assert_eq!(
            outcome.success,
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_malformed_feed_aborts_without_touching_page() {
        let w = DisclaimerWidget::new(WidgetOptions {
            inline_feed: Some("{\"no\": \"disclaimers\"}".to_string()),
            ..Default::default()
        })
        .unwrap();
        let mut page = HostPage::new("https://host/it/page.html");
        let err = w.insert_page_contents(&mut page).await.unwrap_err();
        assert!(matches!(err, WidgetError::MalformedFeed(_)));
        assert!(page
            .container_html(crate::config::DEFAULT_CONTAINER_ID)
            .is_none());
    }
}
