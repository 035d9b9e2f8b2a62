//! Easter Eggs Example - Key sequences from a real terminal
//!
//! Type "as" to toggle the briefcase, or enter the Konami code.
//! Escape or Ctrl+C quits.
//!
//! Run with: RUST_LOG=spark_sequence=debug cargo run --example easter_eggs

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use spark_sequence::{input::poll_key, presets, triggers};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("Easter egg hints:");
    for hint in presets::hints() {
        println!("  {}", hint);
    }

    let briefcase_visible = Rc::new(Cell::new(false));
    let visible = briefcase_visible.clone();
    let cleanup = triggers::install_presets(move |name| match name {
        "briefcase" => {
            visible.set(!visible.get());
            let state = if visible.get() { "shown" } else { "hidden" };
            print!("💼 briefcase {}\r\n", state);
        }
        "konami" => print!("🎮 Konami Code Activated! You found another secret!\r\n"),
        _ => {}
    })?;

    enable_raw_mode()?;
    let result = run();
    disable_raw_mode()?;

    cleanup();
    result
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let Some(event) = poll_key(Duration::from_millis(100))? else {
            continue;
        };

        if event.key == "Escape" || (event.modifiers.ctrl && event.key == "c") {
            return Ok(());
        }

        triggers::dispatch(&event);
    }
}
