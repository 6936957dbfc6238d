//! In-memory stand-in for the host page.
//!
//! The original widget mutates a live DOM; the engine instead owns a
//! [`HostPage`]: the page's current URL plus named HTML containers. Hosts
//! embed one per render pass and read the container markup back out.

use std::collections::BTreeMap;

/// The host page: current URL and named containers of inner HTML.
#[derive(Debug, Clone)]
pub struct HostPage {
    url: String,
    containers: BTreeMap<String, String>,
}

impl HostPage {
    /// Create a page model for the given current URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            containers: BTreeMap::new(),
        }
    }

    /// The page's current URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Inner HTML of a container, if it exists.
    pub fn container_html(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(String::as_str)
    }

    /// Lazily create the container and replace its content. Prior content
    /// is discarded — one render pass owns the container exclusively.
    pub(crate) fn set_container(&mut self, id: &str, html: String) {
        self.containers.insert(id.to_string(), html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_lazily_created_and_replaced() {
        let mut page = HostPage::new("https://example.com/p");
        assert!(page.container_html("box").is_none());

        page.set_container("box", "<p>one</p>".into());
        assert_eq!(page.container_html("box"), Some("<p>one</p>"));

        page.set_container("box", "<p>two</p>".into());
        assert_eq!(page.container_html("box"), Some("<p>two</p>"));
    }
}
