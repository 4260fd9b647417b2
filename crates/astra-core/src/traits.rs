//! Core traits for Astra abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, so storage can be swapped without touching callers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::defaults::IMAGE_ENTRY_CONTENT;
use crate::models::{EntryKind, HistoryEntry, ImageMetadata};

// =============================================================================
// HISTORY STORE
// =============================================================================

/// Append-only, per-user log of exchanged messages.
///
/// Writes are infallible. Buckets are created lazily on first write.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one entry to `user_id`'s bucket and return its id.
    async fn record(
        &self,
        user_id: &str,
        kind: EntryKind,
        content: &str,
        image_metadata: Option<ImageMetadata>,
    ) -> Uuid;

    /// Append the image entry and the response entry of one exchange, in that
    /// order, with no other writer's entry in between.
    async fn record_exchange(
        &self,
        user_id: &str,
        metadata: ImageMetadata,
        response: &str,
    ) -> (Uuid, Uuid);

    /// Snapshot of a user's entries, oldest first. Empty for unknown users.
    async fn entries(&self, user_id: &str) -> Vec<HistoryEntry>;

    /// Number of entries held for a user.
    async fn len(&self, user_id: &str) -> usize {
        self.entries(user_id).await.len()
    }
}

/// Build the image/response entry pair for one exchange.
pub fn exchange_entries(
    user_id: &str,
    metadata: ImageMetadata,
    response: &str,
) -> (HistoryEntry, HistoryEntry) {
    (
        HistoryEntry::new(user_id, EntryKind::Image, IMAGE_ENTRY_CONTENT, Some(metadata)),
        HistoryEntry::new(user_id, EntryKind::Response, response, None),
    )
}
