//! Config Module - Declare sequence triggers in TOML
//!
//! ```toml
//! [[trigger]]
//! preset = "konami"
//!
//! [[trigger]]
//! name = "secret"
//! keys = ["s", "e", "c", "r", "e", "t"]
//! mode = "strict"
//! case = "lowercase"
//! idle_timeout_ms = 1500
//! ```
//!
//! A trigger names either `keys` or a built-in `preset`, never both. With a
//! preset, `mode` and `case` default to the preset's own policy.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SequenceError};
use crate::keys::KeyCase;
use crate::matcher::{MatchMode, SequenceMatcher};
use crate::presets;
use crate::triggers;

/// One `[[trigger]]` table
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Defaults to the preset name when a preset is used
    pub name: Option<String>,
    pub keys: Option<Vec<String>>,
    pub preset: Option<String>,
    pub mode: Option<MatchMode>,
    pub case: Option<KeyCase>,
    /// Forget partial input after this long without a key press
    pub idle_timeout_ms: Option<u64>,
}

/// A whole trigger file
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggersConfig {
    #[serde(default, rename = "trigger")]
    pub triggers: Vec<TriggerConfig>,
}

impl TriggersConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: TriggersConfig = toml::from_str(source)?;
        // Surface declaration errors at load time, not first key press
        for trigger in &config.triggers {
            trigger.matcher()?;
        }
        Ok(config)
    }

    /// Register every declared trigger with one handler.
    /// Returns a cleanup function removing all of them.
    pub fn install<F>(&self, handler: F) -> Result<Box<dyn FnOnce()>>
    where
        F: Fn(&str) + Clone + 'static,
    {
        let mut cleanups: Vec<Box<dyn FnOnce()>> = Vec::with_capacity(self.triggers.len());
        for trigger in &self.triggers {
            let name = trigger.name()?;
            let matcher = trigger.matcher()?;
            let case = trigger.case()?;
            let handler = handler.clone();

            let cleanup: Box<dyn FnOnce()> = match trigger.idle_timeout() {
                Some(timeout) => Box::new(triggers::on_sequence_with_timeout(
                    &name, matcher, case, timeout, handler,
                )),
                None => Box::new(triggers::on_sequence(&name, matcher, case, handler)),
            };
            cleanups.push(cleanup);
        }

        Ok(Box::new(move || {
            for cleanup in cleanups {
                cleanup();
            }
        }))
    }
}

impl TriggerConfig {
    fn invalid(&self, reason: &str) -> SequenceError {
        SequenceError::InvalidTrigger {
            name: self.display_name().to_string(),
            reason: reason.to_string(),
        }
    }

    fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.preset.as_deref())
            .unwrap_or("<unnamed>")
    }

    fn preset(&self) -> Result<Option<presets::Preset>> {
        match &self.preset {
            None => Ok(None),
            Some(name) => presets::preset(name)
                .map(Some)
                .ok_or_else(|| SequenceError::UnknownPreset(name.clone())),
        }
    }

    pub fn name(&self) -> Result<String> {
        match (&self.name, self.preset()?) {
            (Some(name), _) => Ok(name.clone()),
            (None, Some(preset)) => Ok(preset.name.to_string()),
            (None, None) => Err(self.invalid("missing `name`")),
        }
    }

    pub fn case(&self) -> Result<KeyCase> {
        Ok(match (self.case, self.preset()?) {
            (Some(case), _) => case,
            (None, Some(preset)) => preset.case,
            (None, None) => KeyCase::default(),
        })
    }

    pub fn mode(&self) -> Result<MatchMode> {
        Ok(match (self.mode, self.preset()?) {
            (Some(mode), _) => mode,
            (None, Some(preset)) => preset.mode,
            (None, None) => MatchMode::default(),
        })
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_ms.map(Duration::from_millis)
    }

    /// Build the matcher, with keys normalized by the effective `case`
    pub fn matcher(&self) -> Result<SequenceMatcher<String>> {
        let case = self.case()?;
        let keys: Vec<String> = match (&self.keys, self.preset()?) {
            (Some(_), Some(_)) => return Err(self.invalid("set either `keys` or `preset`, not both")),
            (None, None) => return Err(self.invalid("needs `keys` or `preset`")),
            (Some(keys), None) => keys.iter().map(|k| case.normalize(k)).collect(),
            (None, Some(preset)) => preset.keys.iter().map(|k| case.normalize(k)).collect(),
        };
        // Check name too so a nameless `keys` trigger fails here
        self.name()?;
        SequenceMatcher::new(keys, self.mode()?)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyboardEvent;
    use crate::triggers::{dispatch, reset_trigger_state, trigger_count};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_parse_preset_and_keys() {
        let config = TriggersConfig::from_toml_str(
            r#"
            [[trigger]]
            preset = "konami"

            [[trigger]]
            name = "secret"
            keys = ["S", "e", "c"]
            mode = "strict"
            case = "lowercase"
            idle_timeout_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.triggers.len(), 2);

        let konami = &config.triggers[0];
        assert_eq!(konami.name().unwrap(), "konami");
        assert_eq!(konami.mode().unwrap(), MatchMode::Strict);
        assert_eq!(konami.case().unwrap(), KeyCase::Exact);
        assert_eq!(konami.matcher().unwrap().target_len(), 10);

        let secret = &config.triggers[1];
        assert_eq!(secret.idle_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(secret.matcher().unwrap().target(), &["s", "e", "c"]);
    }

    #[test]
    fn test_preset_policy_can_be_overridden() {
        let config = TriggersConfig::from_toml_str(
            r#"
            [[trigger]]
            preset = "briefcase"
            name = "bag"
            mode = "strict"
            "#,
        )
        .unwrap();
        let trigger = &config.triggers[0];
        assert_eq!(trigger.name().unwrap(), "bag");
        assert_eq!(trigger.mode().unwrap(), MatchMode::Strict);
        assert_eq!(trigger.case().unwrap(), KeyCase::Lowercase);
    }

    #[test]
    fn test_empty_config() {
        let config = TriggersConfig::from_toml_str("").unwrap();
        assert!(config.triggers.is_empty());
    }

    #[test]
    fn test_errors() {
        let unknown = TriggersConfig::from_toml_str("[[trigger]]\npreset = \"nope\"\n");
        assert!(matches!(unknown, Err(SequenceError::UnknownPreset(ref n)) if n == "nope"));

        let empty = TriggersConfig::from_toml_str("[[trigger]]\nname = \"x\"\nkeys = []\n");
        assert!(matches!(empty, Err(SequenceError::EmptyTarget)));

        let both = TriggersConfig::from_toml_str(
            "[[trigger]]\nname = \"x\"\nkeys = [\"a\"]\npreset = \"konami\"\n",
        );
        assert!(matches!(both, Err(SequenceError::InvalidTrigger { .. })));

        let neither = TriggersConfig::from_toml_str("[[trigger]]\nname = \"x\"\n");
        assert!(matches!(neither, Err(SequenceError::InvalidTrigger { .. })));

        let nameless = TriggersConfig::from_toml_str("[[trigger]]\nkeys = [\"a\"]\n");
        assert!(matches!(nameless, Err(SequenceError::InvalidTrigger { .. })));

        let bad_mode = TriggersConfig::from_toml_str("[[trigger]]\npreset = \"konami\"\nmode = \"fuzzy\"\n");
        assert!(matches!(bad_mode, Err(SequenceError::Toml(_))));
    }

    #[test]
    fn test_install() {
        reset_trigger_state();

        let config = TriggersConfig::from_toml_str(
            r#"
            [[trigger]]
            name = "hi"
            keys = ["h", "i"]

            [[trigger]]
            name = "slow"
            keys = ["z"]
            idle_timeout_ms = 100
            "#,
        )
        .unwrap();

        let fired = Rc::new(RefCell::new(Vec::new()));
        let fired_clone = fired.clone();
        let cleanup = config
            .install(move |name: &str| fired_clone.borrow_mut().push(name.to_string()))
            .unwrap();
        assert_eq!(trigger_count(), 2);

        dispatch(&KeyboardEvent::new("h"));
        dispatch(&KeyboardEvent::new("i"));
        dispatch(&KeyboardEvent::new("z"));
        assert_eq!(*fired.borrow(), vec!["hi".to_string(), "slow".to_string()]);

        cleanup();
        assert_eq!(trigger_count(), 0);
    }
}
