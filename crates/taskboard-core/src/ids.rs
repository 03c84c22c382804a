use crate::traits::IdGenerator;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Millisecond-timestamp ids that never repeat.
///
/// Each id is the current wall-clock time in milliseconds unless that would not
/// be greater than the last id handed out, in which case it is `last + 1`.
pub struct MonotonicClockIds {
    last: AtomicI64,
    clock: Clock,
}

impl MonotonicClockIds {
    pub fn new() -> Self {
        Self::with_clock(|| Utc::now().timestamp_millis())
    }

    /// Build a generator reading time from `clock` (milliseconds).
    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
            clock: Box::new(clock),
        }
    }
}

impl Default for MonotonicClockIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for MonotonicClockIds {
    fn next_id(&self) -> i64 {
        let now = (self.clock)();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = if last == i64::MIN {
                now
            } else {
                now.max(last.saturating_add(1))
            };
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}
