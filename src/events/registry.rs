use std::sync::OnceLock;

use super::{Listener, StoreEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Registered event listeners.
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listeners are called in registration order.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    async fn dispatch(&self, event: &StoreEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Registers event listeners for the lifetime of the process.
///
/// Only the first call takes effect; later calls log a warning.
///
/// ```rust,ignore
/// use roster_store::register_event_listeners;
/// use roster_store::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "roster_store",
            "msg=\"register_event_listeners called more than once, ignoring\""
        );
    }
}

/// Sends `event` to every registered listener. No-op without listeners.
pub async fn dispatch(event: StoreEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
