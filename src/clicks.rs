//! Click Counter - Fire after N clicks in a short burst
//!
//! Counts repeated clicks on one target. Every click arms its own zeroing
//! deadline `window` later, and the count drops to zero whenever any of those
//! deadlines passes, including deadlines armed before the last fire. Reaching
//! the threshold fires once and zeroes the count.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use spark_sequence::ClickCounter;
//!
//! let mut counter = ClickCounter::triple_click();
//! let t0 = Instant::now();
//! assert!(!counter.click_at(t0));
//! assert!(!counter.click_at(t0 + Duration::from_millis(100)));
//! assert!(counter.click_at(t0 + Duration::from_millis(200)));
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::error::{Result, SequenceError};

/// Triple click: 3 clicks within 500ms
pub const TRIPLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Logo clicks: 5 clicks within 2s
pub const LOGO_CLICK_WINDOW: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug)]
pub struct ClickCounter {
    threshold: u32,
    window: Duration,
    count: u32,
    /// Clicks whose zeroing deadline hasn't passed yet, oldest first
    pending: VecDeque<Instant>,
}

impl ClickCounter {
    /// Create a counter that fires on the `threshold`-th click of a burst.
    pub fn new(threshold: u32, window: Duration) -> Result<Self> {
        if threshold == 0 {
            return Err(SequenceError::ZeroThreshold);
        }
        Ok(Self::with(threshold, window))
    }

    pub fn triple_click() -> Self {
        Self::with(3, TRIPLE_CLICK_WINDOW)
    }

    pub fn logo_clicks() -> Self {
        Self::with(5, LOGO_CLICK_WINDOW)
    }

    fn with(threshold: u32, window: Duration) -> Self {
        Self {
            threshold,
            window,
            count: 0,
            pending: VecDeque::new(),
        }
    }

    /// Register a click at `now`. Returns true when it reaches the threshold.
    pub fn click_at(&mut self, now: Instant) -> bool {
        let mut expired = false;
        while let Some(&clicked) = self.pending.front() {
            if now.saturating_duration_since(clicked) < self.window {
                break;
            }
            self.pending.pop_front();
            expired = true;
        }

        // Every earlier click was handled before that deadline passed, so an
        // elapsed deadline zeroes the whole count
        if expired && self.count > 0 {
            tracing::trace!(dropped = self.count, "click burst expired");
            self.count = 0;
        }

        self.pending.push_back(now);
        self.count += 1;
        if self.count >= self.threshold {
            // Deadlines stay armed and keep zeroing after a fire
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn click(&mut self) -> bool {
        self.click_at(Instant::now())
    }

    /// Clicks counted as of the latest click
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.pending.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
