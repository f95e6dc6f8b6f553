use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::FeedSource;
use crate::error::SyncError;
use crate::models::Feed;

/// Map of feed id to feed metadata, backed by a JSON snapshot on disk.
///
/// Lookups are answered from memory; a miss triggers exactly one wholesale
/// refresh from the remote source before the id is declared unknown. The
/// write guard is held across the whole probe/refresh/re-probe sequence, so
/// concurrent misses cannot race each other into duplicate fetches.
pub struct FeedCache {
    source: Arc<dyn FeedSource>,
    path: PathBuf,
    feeds: RwLock<HashMap<i64, Feed>>,
}

impl FeedCache {
    /// An empty cache. `path` is where the snapshot lives; the file is only
    /// touched by `load`, `refresh`, and miss-triggered refills.
    pub fn new(source: Arc<dyn FeedSource>, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
            feeds: RwLock::new(HashMap::new()),
        }
    }

    /// Populate from the snapshot file if present, otherwise from the remote
    /// source (which also writes the first snapshot). A corrupt snapshot is
    /// fatal; whether to delete the file and refetch is the caller's call.
    pub async fn load(&self) -> Result<(), SyncError> {
        let mut feeds = self.feeds.write().await;
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let list: Vec<Feed> = serde_json::from_slice(&bytes)?;
                *feeds = index(list);
                debug!(count = feeds.len(), path = %self.path.display(), "loaded feed snapshot");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => self.refill(&mut feeds).await,
            Err(err) => Err(err.into()),
        }
    }

    /// Look up a feed, refilling from the remote source at most once on a
    /// miss. An id still absent after the refill does not exist server-side.
    pub async fn get(&self, feed_id: i64) -> Result<Feed, SyncError> {
        let mut feeds = self.feeds.write().await;
        if let Some(feed) = feeds.get(&feed_id) {
            return Ok(feed.clone());
        }
        self.refill(&mut feeds).await?;
        feeds
            .get(&feed_id)
            .cloned()
            .ok_or(SyncError::FeedNotFound(feed_id))
    }

    /// Force a full reload from the remote source.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let mut feeds = self.feeds.write().await;
        self.refill(&mut feeds).await
    }

    /// Write the current mapping to the snapshot file.
    pub async fn persist(&self) -> Result<(), SyncError> {
        let feeds = self.feeds.read().await;
        self.write_snapshot(&feeds).await
    }

    /// Copy of the current mapping.
    pub async fn feeds(&self) -> HashMap<i64, Feed> {
        self.feeds.read().await.clone()
    }

    // Wholesale replace: the server list is authoritative, so a feed deleted
    // there must disappear here rather than linger from a merge.
    async fn refill(&self, feeds: &mut HashMap<i64, Feed>) -> Result<(), SyncError> {
        let fetched = self.source.fetch_feeds().await?;
        info!(count = fetched.len(), "refreshed feed list from server");
        *feeds = index(fetched);
        self.write_snapshot(feeds).await
    }

    // Write-then-rename so a crash mid-write cannot leave a truncated file.
    async fn write_snapshot(&self, feeds: &HashMap<i64, Feed>) -> Result<(), SyncError> {
        let list: Vec<&Feed> = feeds.values().collect();
        let bytes = serde_json::to_vec_pretty(&list)?;
        if let Some(parent) = self.path.parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn index(list: Vec<Feed>) -> HashMap<i64, Feed> {
    list.into_iter().map(|feed| (feed.feed_id, feed)).collect()
}
