//! Sidebar manifest and configuration patching.
//!
//! The site configuration is patched textually: the first `sidebar: [...]`
//! array literal is replaced by the pretty-printed entries. Nested brackets
//! inside the old literal are not supported.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::{Result, TreemarkError};

static SIDEBAR_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"sidebar:\s*\[[^\]]*\]").expect("valid sidebar regex"));

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    /// Display label
    pub text: String,
    /// Site path of the page, `"/" + file name`
    pub link: String,
}

impl SidebarEntry {
    /// Create an entry linking to a page file
    pub fn new(text: &str, file_name: &str) -> Self {
        Self {
            text: text.to_string(),
            link: format!("/{}", file_name),
        }
    }
}

/// Replace the sidebar array in `config` with `entries`.
///
/// Returns `None` when the configuration has no sidebar array.
pub fn patch_sidebar(config: &str, entries: &[SidebarEntry]) -> Result<Option<String>> {
    if !SIDEBAR_ARRAY.is_match(config) {
        return Ok(None);
    }

    let replacement = format!("sidebar: {}", serde_json::to_string_pretty(entries)?);
    let patched = SIDEBAR_ARRAY.replace(config, NoExpand(&replacement));
    Ok(Some(patched.into_owned()))
}

/// Patch the sidebar of the configuration file at `path` in place.
///
/// Returns `false`, leaving the file untouched, when it has no sidebar array.
pub fn update_sidebar_file(path: &Path, entries: &[SidebarEntry]) -> Result<bool> {
    let io_err = |source| TreemarkError::Io {
        path: path.to_path_buf(),
        source,
    };

    let config = fs::read_to_string(path).map_err(io_err)?;
    match patch_sidebar(&config, entries)? {
        Some(patched) => {
            fs::write(path, patched).map_err(io_err)?;
            tracing::debug!(path = %path.display(), entries = entries.len(), "sidebar updated");
            Ok(true)
        }
        None => {
            tracing::warn!(path = %path.display(), "no sidebar array found, config left unchanged");
            Ok(false)
        }
    }
}
