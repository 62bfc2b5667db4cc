//! Store events.
//!
//! Collections and auth actions dispatch a [`StoreEvent`] after every
//! successful change. Without registered listeners dispatch does nothing.
//!
//! ```rust,ignore
//! use roster_store::register_event_listeners;
//! use roster_store::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::StoreEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventRegistry};
