//! Page persistence.

use std::fs;
use std::path::PathBuf;

use crate::service::RenderedPage;
use crate::sidebar::SidebarEntry;
use crate::{Result, TreemarkError};

/// Destination for rendered pages
pub trait PageSink {
    /// Store `content` under `file_name`
    fn write(&self, file_name: &str, content: &str) -> Result<()>;
}

/// Writes pages as UTF-8 files into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PageSink for DirectorySink {
    fn write(&self, file_name: &str, content: &str) -> Result<()> {
        let path = self.dir.join(file_name);
        fs::write(&path, content).map_err(|source| TreemarkError::Io { path, source })
    }
}

/// Write every page in order and collect their sidebar entries.
///
/// Stops at the first failed write.
pub fn write_pages<S: PageSink + ?Sized>(
    sink: &S,
    pages: &[RenderedPage],
) -> Result<Vec<SidebarEntry>> {
    let mut entries = Vec::with_capacity(pages.len());

    for page in pages {
        sink.write(&page.file_name, &page.content)?;
        tracing::debug!(file = %page.file_name, bytes = page.content.len(), "page written");
        entries.push(page.sidebar.clone());
    }

    Ok(entries)
}
