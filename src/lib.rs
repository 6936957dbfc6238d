//! Placard — feed-driven legal notice engine.
//!
//! Fetches a disclaimer feed (JSON or XML), validates each record,
//! filters by page URL, active date range, and division, and renders the
//! eligible records as HTML into a named container of a [`HostPage`].

pub mod config;
pub mod eligibility;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod page;
pub mod render;
pub mod text;
pub mod widget;

pub use config::WidgetOptions;
pub use error::WidgetError;
pub use feed::{Disclaimer, Feed, LoadedFeed};
pub use page::HostPage;
pub use render::RenderOutcome;
pub use widget::DisclaimerWidget;
