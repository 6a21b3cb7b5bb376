//! TopicService - the main entry point for topic to Markdown conversion.

use treemark_core::{render_document, RenderOptions};

use crate::sidebar::SidebarEntry;
use crate::topic::TopicRecord;

/// A rendered topic, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// File name the page is stored under, e.g. `"12.md"`
    pub file_name: String,
    /// Markdown text
    pub content: String,
    /// Sidebar entry pointing at the page
    pub sidebar: SidebarEntry,
}

/// The main service for converting topic records to Markdown
#[derive(Debug, Clone, Default)]
pub struct TopicService {
    options: RenderOptions,
}

impl TopicService {
    /// Create a new TopicService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a TopicService with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a topic record to a Markdown document
    pub fn render(&self, record: &TopicRecord) -> String {
        render_document(record.page_title().as_deref(), &record.payload(), &self.options)
    }

    /// Render a topic record together with its file name and sidebar entry
    pub fn render_page(&self, record: &TopicRecord) -> RenderedPage {
        let file_name = record.file_name();
        let label = record.label().unwrap_or_else(|| file_name.clone());
        let sidebar = SidebarEntry::new(&label, &file_name);

        RenderedPage {
            content: self.render(record),
            sidebar,
            file_name,
        }
    }

    /// Render a batch of records, keeping their order
    #[cfg(not(feature = "parallel"))]
    pub fn render_all(&self, records: &[TopicRecord]) -> Vec<RenderedPage> {
        records.iter().map(|r| self.render_page(r)).collect()
    }

    /// Render a batch of records on the rayon pool, keeping their order
    #[cfg(feature = "parallel")]
    pub fn render_all(&self, records: &[TopicRecord]) -> Vec<RenderedPage> {
        use rayon::prelude::*;

        records.par_iter().map(|r| self.render_page(r)).collect()
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }
}
