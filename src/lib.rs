//! # spark-sequence
//!
//! Key sequence triggers for reactive terminal UIs: Konami codes, typed
//! secrets, click bursts.
//!
//! ## Architecture
//!
//! The core is [`SequenceMatcher`], a tiny state machine fed one symbol at a
//! time that reports the instant a target sequence completes. Everything else
//! is layered around it:
//!
//! ```text
//! crossterm KeyEvent → KeyboardEvent → KeyCase symbol → every trigger's matcher → handler
//! ```
//!
//! Time never enters the matcher. [`IdleReset`] and [`ClickCounter`] take the
//! current `Instant` as an argument so they can be driven from tests.
//!
//! ## Modules
//!
//! - [`matcher`] - Sliding-window and strict progressive matching
//! - [`idle`] - Reset partial input after a pause
//! - [`clicks`] - N clicks within a window
//! - [`keys`] - Keyboard event types and key-name normalization
//! - [`input`] - crossterm conversion and polling
//! - [`triggers`] - Named triggers fed from one keyboard stream
//! - [`presets`] - Built-in sequences
//! - [`config`] - TOML trigger declarations

pub mod clicks;
pub mod config;
pub mod error;
pub mod idle;
pub mod input;
pub mod keys;
pub mod matcher;
pub mod presets;
pub mod triggers;

// Re-export commonly used items
pub use clicks::ClickCounter;
pub use config::{TriggerConfig, TriggersConfig};
pub use error::{Result, SequenceError};
pub use idle::IdleReset;
pub use keys::{KeyCase, KeyState, KeyboardEvent, Modifiers};
pub use matcher::{MatchMode, SequenceMatcher};
pub use presets::{preset, preset_names, Preset};
pub use triggers::{
    dispatch, dispatch_at, install_presets, last_trigger, on_sequence,
    on_sequence_with_timeout, reset_trigger, reset_trigger_state, trigger_count,
    TriggerHandler,
};
