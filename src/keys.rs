//! Keys Module - Keyboard event types and key-name symbols
//!
//! Keyboard events carry DOM-style key names ("a", "Enter", "ArrowUp").
//! Sequence triggers match on those names, optionally case-folded.
//!
//! # Example
//!
//! ```
//! use spark_sequence::{KeyCase, KeyboardEvent};
//!
//! let event = KeyboardEvent::new("A");
//! assert_eq!(KeyCase::Exact.symbol(&event), "A");
//! assert_eq!(KeyCase::Lowercase.symbol(&event), "a");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

// =============================================================================
// SYMBOLS
// =============================================================================

/// How a key name is turned into a matcher symbol
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    /// Compare key names as reported ("B" and "b" differ)
    #[default]
    Exact,
    /// Lowercase the key name first, so Shift doesn't break typed codes
    Lowercase,
}

impl KeyCase {
    /// Symbol for `event` under this policy
    pub fn symbol(self, event: &KeyboardEvent) -> String {
        self.normalize(&event.key)
    }

    /// Apply this policy to a bare key name.
    ///
    /// Multi-character names like "ArrowUp" are lowercased too, so targets
    /// declared with `Lowercase` should be lowercased the same way.
    pub fn normalize(self, key: &str) -> String {
        match self {
            KeyCase::Exact => key.to_string(),
            KeyCase::Lowercase => key.to_lowercase(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
