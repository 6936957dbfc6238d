//! Pipeline error taxonomy.
//!
//! Errors are clonable on purpose: the loader memoizes its single-shot
//! outcome, and every caller that joins the load gets the same error value.
//! Per-record validation failures are not errors — they are absorbed and
//! reported through [`crate::feed::LoadedFeed::invalid_ids`].

/// Errors surfaced by the disclaimer pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WidgetError {
    /// Network/transport failure while fetching the feed. No render is
    /// attempted.
    #[error("feed fetch failed: {0}")]
    Transport(String),

    /// The feed body could not be understood: unparseable as both XML and
    /// JSON, or missing the top-level `disclaimers` key.
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// The widget's render entry point was invoked a second time, either
    /// concurrently or after a completed pass. The prior render is left
    /// untouched.
    #[error("insertPageContents already executed for this widget instance")]
    AlreadyExecuted,

    /// Unusable configuration, e.g. neither `feed_url` nor `inline_feed`
    /// was supplied.
    #[error("bad option: {0}")]
    BadOption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = WidgetError::Transport("connection refused".into());
        assert!(e.to_string().contains("feed fetch failed"));

        let e = WidgetError::MalformedFeed("missing disclaimers".into());
        assert_eq!(e.to_string(), "malformed feed: missing disclaimers");
    }

    #[test]
    fn test_error_is_cloneable() {
        let e = WidgetError::AlreadyExecuted;
        let e2 = e.clone();
        assert_eq!(e.to_string(), e2.to_string());
    }
}
