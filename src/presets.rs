//! Built-in key sequences
//!
//! - `konami` - ↑ ↑ ↓ ↓ ← → ← → B A, strict, case-sensitive
//! - `briefcase` - type "as" anywhere, sliding, case-insensitive

use crate::error::Result;
use crate::keys::KeyCase;
use crate::matcher::{MatchMode, SequenceMatcher};

/// A named key sequence with its matching policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub keys: &'static [&'static str],
    pub mode: MatchMode,
    pub case: KeyCase,
    /// One-line hint shown to curious users
    pub hint: &'static str,
}

impl Preset {
    /// Fresh matcher over this preset's keys, normalized by its `case`
    pub fn matcher(&self) -> Result<SequenceMatcher<String>> {
        let keys: Vec<String> = self.keys.iter().map(|k| self.case.normalize(k)).collect();
        SequenceMatcher::new(keys, self.mode)
    }
}

pub const KONAMI: Preset = Preset {
    name: "konami",
    keys: &[
        "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown",
        "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight",
        "b", "a",
    ],
    mode: MatchMode::Strict,
    case: KeyCase::Exact,
    hint: "Try the Konami Code (↑↑↓↓←→←→BA)",
};

pub const BRIEFCASE: Preset = Preset {
    name: "briefcase",
    keys: &["a", "s"],
    mode: MatchMode::Sliding,
    case: KeyCase::Lowercase,
    hint: "Type \"as\" anywhere",
};

const PRESETS: &[Preset] = &[BRIEFCASE, KONAMI];

/// Look up a preset by name
pub fn preset(name: &str) -> Option<Preset> {
    PRESETS.iter().find(|p| p.name == name).copied()
}

pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

/// Numbered hint lines, including the click eggs that aren't key sequences
pub fn hints() -> Vec<String> {
    let lines = [
        BRIEFCASE.hint,
        "Triple-click the diamond in the footer",
        "Click the logo 5 times",
        KONAMI.hint,
    ];
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
