use async_trait::async_trait;

use crate::events::{Listener, StoreEvent};

/// Logs every store event through the `log` crate.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Logs at INFO.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &StoreEvent) {
        log::log!(
            target: "roster_store::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_levels() {
        assert_eq!(LoggingListener::default().level, log::Level::Info);
        assert_eq!(
            LoggingListener::with_level(log::Level::Debug).level,
            log::Level::Debug
        );
    }

    #[tokio::test]
    async fn test_handle() {
        let listener = LoggingListener::new();
        let event = StoreEvent::SessionRestored {
            user_id: "1".to_owned(),
            at: Utc::now(),
        };

        listener.handle(&event).await;
    }
}
