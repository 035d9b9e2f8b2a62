//! Error type for matcher construction and trigger configuration.
//!
//! Observing symbols never fails. Only building matchers, click counters and
//! trigger declarations can.

use thiserror::Error;

/// Errors raised while building sequence triggers
#[derive(Debug, Error)]
pub enum SequenceError {
    /// A matcher needs at least one symbol to match against
    #[error("target sequence is empty")]
    EmptyTarget,

    /// A click counter that fires on zero clicks would fire without input
    #[error("click threshold must be at least 1")]
    ZeroThreshold,

    /// `preset = "..."` named something that isn't built in
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    /// A trigger declaration is malformed
    #[error("trigger `{name}`: {reason}")]
    InvalidTrigger { name: String, reason: String },

    /// The TOML document didn't parse
    #[error("invalid trigger config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, SequenceError>;
