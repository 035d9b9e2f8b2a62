//! Idle Reset - Forget partial sequences after a pause
//!
//! Wraps a `SequenceMatcher` and rewinds it when too much time passes between
//! two symbols. The matcher itself has no notion of time; every time-aware
//! call here takes the current `Instant` so tests never sleep.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use spark_sequence::{IdleReset, SequenceMatcher};
//!
//! let matcher = SequenceMatcher::strict(vec!['g', 'g']).unwrap();
//! let mut idle = IdleReset::new(matcher, Duration::from_millis(500));
//!
//! let t0 = Instant::now();
//! assert!(!idle.observe_at('g', t0));
//! // Too slow, the first 'g' is forgotten
//! assert!(!idle.observe_at('g', t0 + Duration::from_secs(1)));
//! ```

use std::time::{Duration, Instant};

use crate::matcher::SequenceMatcher;

/// A matcher that resets itself after `timeout` without input
#[derive(Clone, Debug)]
pub struct IdleReset<T> {
    inner: SequenceMatcher<T>,
    timeout: Duration,
    last_input: Option<Instant>,
}

impl<T: PartialEq + Clone> IdleReset<T> {
    pub fn new(inner: SequenceMatcher<T>, timeout: Duration) -> Self {
        Self {
            inner,
            timeout,
            last_input: None,
        }
    }

    /// Observe a symbol arriving at `now`.
    ///
    /// When the previous symbol is at least `timeout` old the inner matcher
    /// is reset before this one is fed to it.
    pub fn observe_at(&mut self, symbol: T, now: Instant) -> bool {
        self.expire(now);
        self.last_input = Some(now);
        self.inner.observe(symbol)
    }

    /// Observe a symbol arriving right now
    pub fn observe(&mut self, symbol: T) -> bool {
        self.observe_at(symbol, Instant::now())
    }

    /// Reset the inner matcher if it has been idle for `timeout`.
    /// Returns true if a reset happened.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.last_input {
            Some(last) if now.saturating_duration_since(last) >= self.timeout => {
                tracing::trace!(idle = ?now.saturating_duration_since(last), "sequence idle, resetting");
                self.inner.reset();
                self.last_input = None;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.inner.reset();
        self.last_input = None;
    }

    pub fn inner(&self) -> &SequenceMatcher<T> {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// =============================================================================
// TESTS
// =============================================================================
