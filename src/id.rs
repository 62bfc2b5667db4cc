//! Identifier generation.
//!
//! Ids are decimal millisecond timestamps, the same shape earlier data used.
//! Two ids requested within the same millisecond, or after the clock moved
//! backwards, are bumped past the last one handed out so every id is unique
//! and strictly increasing within a process.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate.to_string(),
                Err(current) => last = current,
            }
        }
    }

    /// Records an id that already exists so later ids never collide with it.
    ///
    /// Ids that do not start with a decimal number are ignored.
    pub fn observe(&self, id: &str) {
        let digits: String = id.chars().take_while(char::is_ascii_digit).collect();
        if let Ok(value) = digits.parse::<i64>() {
            self.last.fetch_max(value, Ordering::SeqCst);
        }
    }
}

/// Id of the member at `index` within a roster whose ids share `base`.
pub fn member_id(base: &str, index: usize) -> String {
    format!("{base}-{index}")
}
