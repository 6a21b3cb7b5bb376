//! Topic feeds.
//!
//! A feed reports how many topics it holds and hands them out by index,
//! mirroring the API the records come from.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::topic::TopicRecord;
use crate::{Result, TreemarkError};

/// Source of topic records
pub trait TopicFeed {
    /// Number of topics available
    fn count(&self) -> Result<i64>;

    /// Fetch the topic at `index`
    fn fetch(&self, index: usize) -> Result<TopicRecord>;
}

/// Fetch every topic of a feed in index order.
///
/// The feed must report at least one topic.
pub fn collect_topics<F: TopicFeed + ?Sized>(feed: &F) -> Result<Vec<TopicRecord>> {
    let count = feed.count()?;
    if count < 1 {
        return Err(TreemarkError::InvalidTopicCount(count));
    }

    tracing::debug!(count, "fetching topics");
    (0..count as usize).map(|index| feed.fetch(index)).collect()
}

/// A feed backed by a JSON file holding an array of topic records
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    records: Vec<TopicRecord>,
}

impl JsonFileFeed {
    /// Load all records from `path`.
    ///
    /// The file must hold a JSON array; entries that are not records read as
    /// empty records rather than failing the batch.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TreemarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let values: Vec<Value> = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), records = values.len(), "topic dump loaded");
        Ok(Self::from_records(
            values.into_iter().map(TopicRecord::from_value).collect(),
        ))
    }

    /// Build a feed from records already in memory
    pub fn from_records(records: Vec<TopicRecord>) -> Self {
        Self { records }
    }
}

impl TopicFeed for JsonFileFeed {
    fn count(&self) -> Result<i64> {
        Ok(self.records.len() as i64)
    }

    fn fetch(&self, index: usize) -> Result<TopicRecord> {
        self.records
            .get(index)
            .cloned()
            .ok_or_else(|| TreemarkError::Fetch {
                index,
                reason: format!("feed holds {} topics", self.records.len()),
            })
    }
}
