//! Input Module - crossterm key events as sequence symbols
//!
//! Converts crossterm's key events into `KeyboardEvent`s with DOM-style key
//! names, and polls the terminal for them.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_key` - Wait up to a timeout for a key
//! - `read_key` - Blocking read
//!
//! # Example
//!
//! ```ignore
//! use spark_sequence::input::poll_key;
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_key(Duration::from_millis(16)) {
//!         spark_sequence::dispatch(&event);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    poll, read,
};
use std::time::Duration;

use crate::keys::{KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::SUPER) || mods.contains(KeyModifiers::META),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for a key with timeout.
/// Returns None if no key event arrived within timeout.
pub fn poll_key(timeout: Duration) -> std::io::Result<Option<KeyboardEvent>> {
    if poll(timeout)? {
        read_key()
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking). Non-key events yield None.
pub fn read_key() -> std::io::Result<Option<KeyboardEvent>> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(Some(convert_key_event(key))),
        _ => Ok(None),
    }
}

// =============================================================================
// TESTS
// =============================================================================
