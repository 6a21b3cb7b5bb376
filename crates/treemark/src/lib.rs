//! # treemark
//!
//! Render topic records into Markdown pages and keep a site sidebar in sync.
//!
//! ## Design
//!
//! The rendering itself lives in `treemark-core` and never fails. This crate
//! adds the pipeline around it:
//!
//! - **Feeds**: a [`TopicFeed`] yields records by index, from a JSON dump
//!   ([`JsonFileFeed`]) or from the topic API (`HttpFeed`, `http` feature)
//! - **Service**: [`TopicService`] renders a record into a [`RenderedPage`]
//! - **Sinks**: a [`PageSink`] stores the pages
//! - **Sidebar**: [`patch_sidebar`] rewrites the `sidebar: [...]` literal of a
//!   site configuration file
//!
//! ## Example
//!
//! ```rust
//! use treemark::{TopicRecord, TopicService};
//!
//! let record: TopicRecord = serde_json::from_str(
//!     r#"{"id": 7, "topic": "Demo", "docTree": "[{\"DOMnodeClass\": \"level-2\", \"DOMinnerText\": \"Heading\"}]"}"#,
//! ).unwrap();
//!
//! let page = TopicService::new().render_page(&record);
//! assert_eq!(page.file_name, "7.md");
//! assert_eq!(page.content, "# Demo\n\n## Heading\n\n\n---\n");
//! ```

mod feed;
#[cfg(feature = "http")]
mod http;
mod service;
mod sidebar;
mod sink;
mod topic;

pub use feed::{collect_topics, JsonFileFeed, TopicFeed};
#[cfg(feature = "http")]
pub use http::{ApiClient, ApiRequest, ApiResponse, HttpFeed, Method, ReqwestClient, AUTH_HEADER};
pub use service::{RenderedPage, TopicService};
pub use sidebar::{patch_sidebar, update_sidebar_file, SidebarEntry};
pub use sink::{write_pages, DirectorySink, PageSink};
pub use topic::TopicRecord;
pub use treemark_core::{LevelPattern, RenderOptions};

use std::path::PathBuf;

/// Error type for treemark operations
#[derive(Debug, thiserror::Error)]
pub enum TreemarkError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch topic count: {reason}")]
    CountRequest { reason: String },

    #[error("Invalid topic count: {0}")]
    InvalidTopicCount(i64),

    #[error("Failed to fetch topic at index {index}: {reason}")]
    Fetch { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, TreemarkError>;
