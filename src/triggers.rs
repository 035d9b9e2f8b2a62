//! Triggers Module - Named sequence triggers fed from one keyboard stream
//!
//! Every registered trigger owns its own matcher. A dispatched key press is
//! fed to all of them, so triggers never interfere with each other, and the
//! handlers of every trigger that completed run after the registry is released
//! (handlers may register or remove triggers).
//!
//! # API
//!
//! - `on_sequence(name, matcher, case, fn)` - Register a trigger
//! - `on_sequence_with_timeout(...)` - Same, forgetting partial input after a pause
//! - `dispatch(event)` - Feed a key press to every trigger
//! - `last_trigger()` - Name of the last trigger that fired (reactive)
//! - `install_presets(fn)` - Register the built-in key sequences
//!
//! # Example
//!
//! ```ignore
//! use spark_sequence::{triggers, presets, KeyboardEvent};
//!
//! let cleanup = triggers::on_sequence(
//!     "konami",
//!     presets::KONAMI.matcher()?,
//!     presets::KONAMI.case,
//!     |name| println!("{} activated!", name),
//! );
//!
//! triggers::dispatch(&KeyboardEvent::new("ArrowUp"));
//!
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use spark_signals::{signal, Signal};

use crate::error::Result;
use crate::idle::IdleReset;
use crate::keys::{KeyCase, KeyboardEvent};
use crate::matcher::SequenceMatcher;
use crate::presets;

// =============================================================================
// TYPES
// =============================================================================

/// Handler for a completed sequence. Receives the trigger name.
pub type TriggerHandler = Rc<dyn Fn(&str)>;

enum TriggerMatcher {
    Plain(SequenceMatcher<String>),
    Idle(IdleReset<String>),
}

impl TriggerMatcher {
    fn observe_at(&mut self, symbol: String, now: Instant) -> bool {
        match self {
            TriggerMatcher::Plain(matcher) => matcher.observe(symbol),
            TriggerMatcher::Idle(idle) => idle.observe_at(symbol, now),
        }
    }

    fn reset(&mut self) {
        match self {
            TriggerMatcher::Plain(matcher) => matcher.reset(),
            TriggerMatcher::Idle(idle) => idle.reset(),
        }
    }
}

struct Trigger {
    id: usize,
    name: String,
    case: KeyCase,
    matcher: TriggerMatcher,
    handler: TriggerHandler,
}

// =============================================================================
// STATE
// =============================================================================

struct TriggerRegistry {
    triggers: Vec<Trigger>,
    next_id: usize,
}

impl TriggerRegistry {
    fn new() -> Self {
        Self {
            triggers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<TriggerRegistry> = RefCell::new(TriggerRegistry::new());
    static LAST_TRIGGER: Signal<Option<String>> = signal(None);
}

/// Name of the last trigger that fired
pub fn last_trigger() -> Option<String> {
    LAST_TRIGGER.with(|s| s.get())
}

/// Number of registered triggers
pub fn trigger_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().triggers.len())
}

// =============================================================================
// REGISTRATION
// =============================================================================

fn register(name: &str, case: KeyCase, matcher: TriggerMatcher, handler: TriggerHandler) -> usize {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.triggers.push(Trigger {
            id,
            name: name.to_string(),
            case,
            matcher,
            handler,
        });
        tracing::debug!(trigger = name, id, "sequence trigger registered");
        id
    })
}

fn unregister(id: usize) {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        if let Some(pos) = reg.triggers.iter().position(|t| t.id == id) {
            let trigger = reg.triggers.remove(pos);
            tracing::debug!(trigger = %trigger.name, id, "sequence trigger removed");
        }
    });
}

/// Register a trigger. `matcher` should be built over symbols already
/// normalized by `case` (see `KeyCase::normalize`).
/// Returns cleanup function.
pub fn on_sequence<F>(
    name: &str,
    matcher: SequenceMatcher<String>,
    case: KeyCase,
    handler: F,
) -> impl FnOnce() + use<F>
where
    F: Fn(&str) + 'static,
{
    let id = register(name, case, TriggerMatcher::Plain(matcher), Rc::new(handler));
    move || unregister(id)
}

/// Register a trigger whose partial progress is dropped after `timeout`
/// without a key press.
/// Returns cleanup function.
pub fn on_sequence_with_timeout<F>(
    name: &str,
    matcher: SequenceMatcher<String>,
    case: KeyCase,
    timeout: Duration,
    handler: F,
) -> impl FnOnce() + use<F>
where
    F: Fn(&str) + 'static,
{
    let matcher = TriggerMatcher::Idle(IdleReset::new(matcher, timeout));
    let id = register(name, case, matcher, Rc::new(handler));
    move || unregister(id)
}

/// Register the built-in key sequences (see `presets`) with one handler.
/// Returns a cleanup function removing all of them.
pub fn install_presets<F>(handler: F) -> Result<Box<dyn FnOnce()>>
where
    F: Fn(&str) + 'static,
{
    let handler: TriggerHandler = Rc::new(handler);
    let mut ids = Vec::new();
    for preset in [presets::BRIEFCASE, presets::KONAMI] {
        let matcher = TriggerMatcher::Plain(preset.matcher()?);
        ids.push(register(preset.name, preset.case, matcher, handler.clone()));
    }

    Ok(Box::new(move || {
        for id in ids {
            unregister(id);
        }
    }))
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Feed a keyboard event to every trigger.
/// Returns true if any trigger fired.
pub fn dispatch(event: &KeyboardEvent) -> bool {
    dispatch_at(event, Instant::now())
}

/// Same as `dispatch`, with an explicit arrival time for timed triggers.
pub fn dispatch_at(event: &KeyboardEvent, now: Instant) -> bool {
    // Only presses advance sequences; held keys would otherwise repeat symbols
    if !event.is_press() {
        return false;
    }

    let fired: Vec<(String, TriggerHandler)> = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.triggers
            .iter_mut()
            .filter_map(|trigger| {
                let symbol = trigger.case.symbol(event);
                trigger
                    .matcher
                    .observe_at(symbol, now)
                    .then(|| (trigger.name.clone(), trigger.handler.clone()))
            })
            .collect()
    });

    for (name, handler) in &fired {
        tracing::debug!(trigger = %name, "sequence completed");
        LAST_TRIGGER.with(|s| s.set(Some(name.clone())));
        handler(name);
    }

    !fired.is_empty()
}

/// Drop partial progress of every trigger called `name`.
/// Returns true if any trigger had that name.
pub fn reset_trigger(name: &str) -> bool {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let mut found = false;
        for trigger in reg.triggers.iter_mut().filter(|t| t.name == name) {
            trigger.matcher.reset();
            found = true;
        }
        found
    })
}

/// Reset trigger state (for testing)
pub fn reset_trigger_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.triggers.clear();
        reg.next_id = 0;
    });
    LAST_TRIGGER.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================
