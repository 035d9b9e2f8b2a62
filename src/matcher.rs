//! Matcher Module - Incremental sequence matching over a symbol stream
//!
//! A `SequenceMatcher` is fed one symbol at a time and answers a single
//! question: did that symbol just complete the target sequence?
//!
//! # Modes
//!
//! - **Sliding** - keeps the last N symbols (N = target length) and compares
//!   the whole window on every symbol. A match may start anywhere, and the
//!   window is kept after a match, so back-to-back repeats retrigger.
//! - **Strict** - keeps a cursor into the target. A matching symbol advances
//!   it, anything else drops it to zero. Completing the target fires once and
//!   rewinds the cursor.
//!
//! # Example
//!
//! ```
//! use spark_sequence::{MatchMode, SequenceMatcher};
//!
//! let mut matcher = SequenceMatcher::new(vec!['a', 'b'], MatchMode::Sliding).unwrap();
//! assert!(!matcher.observe('a'));
//! assert!(matcher.observe('b'));
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceError};

// =============================================================================
// TYPES
// =============================================================================

/// Matching policy for a `SequenceMatcher`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Compare the last N symbols against the target on every input
    #[default]
    Sliding,
    /// Advance a cursor on each correct symbol, rewind on any wrong one
    Strict,
}

/// Per-mode observation state. Only one of these exists per matcher.
#[derive(Clone, Debug)]
enum Progress<T> {
    Window(VecDeque<T>),
    Cursor(usize),
}

/// Detects completion of a fixed target sequence in a live symbol stream.
#[derive(Clone, Debug)]
pub struct SequenceMatcher<T> {
    target: Vec<T>,
    mode: MatchMode,
    progress: Progress<T>,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl<T: PartialEq + Clone> SequenceMatcher<T> {
    /// Create a matcher for `target` using the given mode.
    ///
    /// Fails with `SequenceError::EmptyTarget` when `target` has no symbols.
    pub fn new(target: impl Into<Vec<T>>, mode: MatchMode) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(SequenceError::EmptyTarget);
        }

        let progress = match mode {
            MatchMode::Sliding => Progress::Window(VecDeque::with_capacity(target.len())),
            MatchMode::Strict => Progress::Cursor(0),
        };

        Ok(Self { target, mode, progress })
    }

    /// Sliding-window matcher
    pub fn sliding(target: impl Into<Vec<T>>) -> Result<Self> {
        Self::new(target, MatchMode::Sliding)
    }

    /// Strict progressive matcher
    pub fn strict(target: impl Into<Vec<T>>) -> Result<Self> {
        Self::new(target, MatchMode::Strict)
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Feed one symbol. Returns true exactly when it completes the target.
    pub fn observe(&mut self, symbol: T) -> bool {
        match &mut self.progress {
            Progress::Window(window) => {
                window.push_back(symbol);
                if window.len() > self.target.len() {
                    window.pop_front();
                }
                window.iter().eq(self.target.iter())
            }
            Progress::Cursor(cursor) => {
                // A wrong symbol rewinds to zero even when it equals target[0].
                if symbol == self.target[*cursor] {
                    *cursor += 1;
                } else {
                    *cursor = 0;
                }

                if *cursor == self.target.len() {
                    *cursor = 0;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drop everything observed so far
    pub fn reset(&mut self) {
        match &mut self.progress {
            Progress::Window(window) => window.clear(),
            Progress::Cursor(cursor) => *cursor = 0,
        }
    }

    /// How many target symbols the recent input currently accounts for.
    ///
    /// Strict mode reports the cursor. Sliding mode reports the longest tail
    /// of the window that is also a head of the target.
    pub fn progress(&self) -> usize {
        match &self.progress {
            Progress::Cursor(cursor) => *cursor,
            Progress::Window(window) => (1..=window.len())
                .rev()
                .find(|&k| {
                    window
                        .iter()
                        .skip(window.len() - k)
                        .eq(self.target[..k].iter())
                })
                .unwrap_or(0),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn target(&self) -> &[T] {
        &self.target
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Length of the target sequence (never zero)
    pub fn target_len(&self) -> usize {
        self.target.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed<T: PartialEq + Clone>(matcher: &mut SequenceMatcher<T>, input: &[T]) -> Vec<bool> {
        input.iter().cloned().map(|s| matcher.observe(s)).collect()
    }

    const KONAMI: [&str; 10] = [
        "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft",
        "ArrowRight", "ArrowLeft", "ArrowRight", "b", "a",
    ];

    #[test]
    fn test_empty_target_rejected() {
        let result = SequenceMatcher::<char>::sliding(Vec::new());
        assert!(matches!(result, Err(SequenceError::EmptyTarget)));

        let result = SequenceMatcher::<char>::strict(Vec::new());
        assert!(matches!(result, Err(SequenceError::EmptyTarget)));
    }

    #[test]
    fn test_sliding_match_after_noise() {
        let mut matcher = SequenceMatcher::sliding(vec!["a", "b"]).unwrap();
        let results = feed(&mut matcher, &["a", "x", "a", "b"]);
        assert_eq!(results, vec![false, false, false, true]);
    }

    #[test]
    fn test_sliding_retriggers() {
        let mut matcher = SequenceMatcher::sliding(vec!["a", "b"]).unwrap();
        let results = feed(&mut matcher, &["a", "b", "a", "b"]);
        assert_eq!(results, vec![false, true, false, true]);
    }

    #[test]
    fn test_sliding_overlapping_repeat() {
        // Window is kept after a match, so "aaa" completes "aa" twice
        let mut matcher = SequenceMatcher::sliding(vec!['a', 'a']).unwrap();
        let results = feed(&mut matcher, &['a', 'a', 'a']);
        assert_eq!(results, vec![false, true, true]);
    }

    #[test]
    fn test_single_symbol_target() {
        for mode in [MatchMode::Sliding, MatchMode::Strict] {
            let mut matcher = SequenceMatcher::new(vec!['z'], mode).unwrap();
            let results = feed(&mut matcher, &['z', 'q', 'z', 'z']);
            assert_eq!(results, vec![true, false, true, true], "mode {:?}", mode);
        }
    }

    #[test]
    fn test_strict_full_sequence() {
        let mut matcher = SequenceMatcher::strict(KONAMI.to_vec()).unwrap();
        let results = feed(&mut matcher, &KONAMI);
        assert_eq!(results.iter().filter(|&&r| r).count(), 1);
        assert!(results[9]);
        assert_eq!(matcher.progress(), 0);
    }

    #[test]
    fn test_strict_deviation_loses_progress() {
        let mut matcher = SequenceMatcher::strict(KONAMI.to_vec()).unwrap();

        let partial = feed(&mut matcher, &KONAMI[..9]);
        assert!(partial.iter().all(|&r| !r));
        assert_eq!(matcher.progress(), 9);

        // "x" instead of "a"
        assert!(!matcher.observe("x"));
        assert_eq!(matcher.progress(), 0);

        let replay = feed(&mut matcher, &KONAMI);
        let hits: Vec<usize> = replay
            .iter()
            .enumerate()
            .filter(|(_, r)| **r)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![9]);
    }

    #[test]
    fn test_strict_wrong_symbol_not_rechecked_as_prefix() {
        // "ab" then "a": the second "a" is wrong at position 2 and drops the
        // cursor to zero instead of restarting at one
        let mut matcher = SequenceMatcher::strict(vec!['a', 'b', 'c']).unwrap();
        feed(&mut matcher, &['a', 'b', 'a']);
        assert_eq!(matcher.progress(), 0);

        // so "bc" does not complete
        let results = feed(&mut matcher, &['b', 'c']);
        assert_eq!(results, vec![false, false]);
    }

    #[test]
    fn test_strict_no_retrigger_from_residue() {
        let mut matcher = SequenceMatcher::strict(vec!['a', 'b']).unwrap();
        let results = feed(&mut matcher, &['a', 'b', 'b']);
        assert_eq!(results, vec![false, true, false]);
    }

    #[test]
    fn test_reset() {
        let mut sliding = SequenceMatcher::sliding(vec!['a', 'b']).unwrap();
        sliding.observe('a');
        sliding.reset();
        assert!(!sliding.observe('b'));

        let mut strict = SequenceMatcher::strict(vec!['a', 'b']).unwrap();
        strict.observe('a');
        assert_eq!(strict.progress(), 1);
        strict.reset();
        assert_eq!(strict.progress(), 0);
        assert!(!strict.observe('b'));
    }

    #[test]
    fn test_sliding_progress() {
        let mut matcher = SequenceMatcher::sliding(vec!['a', 'b', 'c']).unwrap();
        assert_eq!(matcher.progress(), 0);

        matcher.observe('x');
        assert_eq!(matcher.progress(), 0);

        matcher.observe('a');
        assert_eq!(matcher.progress(), 1);

        matcher.observe('b');
        assert_eq!(matcher.progress(), 2);

        matcher.observe('c');
        assert_eq!(matcher.progress(), 3);

        matcher.observe('a');
        assert_eq!(matcher.progress(), 1);
    }

    #[test]
    fn test_accessors() {
        let matcher = SequenceMatcher::strict(vec![1, 2, 3]).unwrap();
        assert_eq!(matcher.target(), &[1, 2, 3]);
        assert_eq!(matcher.mode(), MatchMode::Strict);
        assert_eq!(matcher.target_len(), 3);
    }

    #[test]
    fn test_mode_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: MatchMode,
        }

        let w: Wrapper = toml::from_str("mode = \"strict\"").unwrap();
        assert_eq!(w.mode, MatchMode::Strict);

        let w: Wrapper = toml::from_str("mode = \"sliding\"").unwrap();
        assert_eq!(w.mode, MatchMode::Sliding);
    }

    fn mode_strategy() -> impl Strategy<Value = MatchMode> {
        prop_oneof![Just(MatchMode::Sliding), Just(MatchMode::Strict)]
    }

    proptest! {
        #[test]
        fn prop_no_match_without_target_symbol(
            input in proptest::collection::vec(0u8..4, 0..64),
            mode in mode_strategy(),
        ) {
            // Target contains 9, which the input never does
            let mut matcher = SequenceMatcher::new(vec![1u8, 9], mode).unwrap();
            for symbol in input {
                prop_assert!(!matcher.observe(symbol));
            }
        }

        #[test]
        fn prop_identical_matchers_agree(
            target in proptest::collection::vec(0u8..3, 1..5),
            input in proptest::collection::vec(0u8..3, 0..64),
            mode in mode_strategy(),
        ) {
            let mut left = SequenceMatcher::new(target.clone(), mode).unwrap();
            let mut right = SequenceMatcher::new(target, mode).unwrap();
            for symbol in input {
                prop_assert_eq!(left.observe(symbol), right.observe(symbol));
                prop_assert_eq!(left.progress(), right.progress());
            }
        }

        #[test]
        fn prop_sliding_matches_iff_tail_equals_target(
            target in proptest::collection::vec(0u8..3, 1..4),
            input in proptest::collection::vec(0u8..3, 0..48),
        ) {
            let mut matcher = SequenceMatcher::sliding(target.clone()).unwrap();
            for (i, symbol) in input.iter().enumerate() {
                let seen = &input[..=i];
                let expected = seen.ends_with(&target);
                prop_assert_eq!(matcher.observe(*symbol), expected);
            }
        }
    }
}
