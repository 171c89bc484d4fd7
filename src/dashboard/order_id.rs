//! Client-side order identifiers

use dashboard_shared::now_ms;
use std::sync::atomic::{AtomicU64, Ordering};

/// Millisecond timestamps used as order ids, bumped so that two clicks in the
/// same millisecond still get distinct, increasing ids.
#[derive(Debug, Default)]
pub struct ClientOrderIds {
    last: AtomicU64,
}

impl ClientOrderIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the wall clock
    pub fn next(&self) -> String {
        self.next_at(now_ms()).to_string()
    }

    fn next_at(&self, now: u64) -> u64 {
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}
