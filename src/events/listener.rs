use async_trait::async_trait;

use super::StoreEvent;

/// Handles store events asynchronously.
///
/// # Example
///
/// ```rust,ignore
/// use roster_store::events::{Listener, StoreEvent};
/// use async_trait::async_trait;
///
/// struct SyncQueue;
///
/// #[async_trait]
/// impl Listener for SyncQueue {
///     async fn handle(&self, event: &StoreEvent) {
///         if let StoreEvent::RecordAdded { key, id, .. } = event {
///             // queue `id` under `key` for upload
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Called for every dispatched event. Filter by matching on the variant.
    async fn handle(&self, event: &StoreEvent);
}
