//! In-process history store.
//!
//! Holds per-user buckets in a `HashMap` behind a `tokio::sync::RwLock`.
//! Contents are lost on restart.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use astra_core::{
    exchange_entries, logging, EntryKind, HistoryEntry, HistoryStore, ImageMetadata,
};

/// Memory-backed [`HistoryStore`] with an optional per-user cap.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    buckets: RwLock<HashMap<String, VecDeque<HistoryEntry>>>,
    max_entries: usize,
}

impl InMemoryHistory {
    /// Create a store keeping at most `max_entries` per user (0 = unbounded).
    pub fn new(max_entries: usize) -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// Number of users with at least one entry.
    pub async fn user_count(&self) -> usize {
        self.buckets.read().await.len()
    }

    /// Drop oldest entries until the bucket fits the cap.
    ///
    /// The newest `protected` entries are never evicted, and a response is
    /// evicted together with the image it answers.
    fn evict(&self, bucket: &mut VecDeque<HistoryEntry>, protected: usize) {
        if self.max_entries == 0 {
            return;
        }
        let limit = self.max_entries.max(protected);
        while bucket.len() > limit {
            let evicted = bucket.pop_front().map(|e| e.kind);
            if evicted == Some(EntryKind::Image)
                && bucket.len() > protected
                && bucket.front().map(|e| e.kind) == Some(EntryKind::Response)
            {
                bucket.pop_front();
            }
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn record(
        &self,
        user_id: &str,
        kind: EntryKind,
        content: &str,
        image_metadata: Option<ImageMetadata>,
    ) -> Uuid {
        let entry = HistoryEntry::new(user_id, kind, content, image_metadata);
        let id = entry.id;

        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(user_id.to_string()).or_default();
        bucket.push_back(entry);
        self.evict(bucket, 1);

        debug!(
            { logging::SUBSYSTEM } = "history",
            { logging::OPERATION } = "record",
            { logging::USER_ID } = user_id,
            kind = kind.as_str(),
            entries = bucket.len(),
            "History entry recorded"
        );
        id
    }

    async fn record_exchange(
        &self,
        user_id: &str,
        metadata: ImageMetadata,
        response: &str,
    ) -> (Uuid, Uuid) {
        let (image, reply) = exchange_entries(user_id, metadata, response);
        let ids = (image.id, reply.id);

        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(user_id.to_string()).or_default();
        bucket.push_back(image);
        bucket.push_back(reply);
        self.evict(bucket, 2);

        debug!(
            { logging::SUBSYSTEM } = "history",
            { logging::OPERATION } = "record_exchange",
            { logging::USER_ID } = user_id,
            entries = bucket.len(),
            "History exchange recorded"
        );
        ids
    }

    async fn entries(&self, user_id: &str) -> Vec<HistoryEntry> {
        self.buckets
            .read()
            .await
            .get(user_id)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn len(&self, user_id: &str) -> usize {
        self.buckets
            .read()
            .await
            .get(user_id)
            .map_or(0, VecDeque::len)
    }
}
