use async_trait::async_trait;

use crate::events::{Listener, StoreEvent};

/// Emits store events as tracing events. Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &StoreEvent) {
        tracing::info!(
            target: "roster_store::events",
            event_name = event.name(),
            ?event,
            "store event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_handle() {
        let event = StoreEvent::ProjectFilesChanged {
            count: 1,
            at: Utc::now(),
        };

        TracingListener.handle(&event).await;
    }
}
