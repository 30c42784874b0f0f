//! Vending Session
//!
//! This demo drives the coin-operated vendor through a short session.
//!
//! Key concepts:
//! - Guard rejections leave the machine untouched
//! - Every committed transition lands in a persisted, bounded log
//! - Checkpoints let a restarted engine resume mid-session
//! - Text and JSON exports of the log
//!
//! Run with: cargo run --example vending_session

use brewfsm::device::{self, symbols::*};
use brewfsm::{Engine, EngineBuilder, ExportFormat, FileStorage, Params};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Vending Session ===\n");

    let dir = std::env::temp_dir().join("brewfsm-vending-session");
    let storage = FileStorage::new(&dir)?;
    println!("Persisting log under {}\n", dir.display());

    let mut engine = Engine::open(device::vendor()?, storage)?;
    if engine.reset().is_persisted() {
        println!("Reset to {}", engine.current_state());
    }

    let steps = [
        (INSERT_COIN, Params::coin(10)),
        (SELECT, Params::item("latte")),
        (INSERT_COIN, Params::coin(20)),
        (SELECT, Params::item("latte")),
    ];
    for (symbol, params) in &steps {
        match engine.apply(*symbol, params) {
            Ok(committed) => println!("  ✓ {}", committed.entry.arrow()),
            Err(e) => println!("  ✗ {symbol}: {}", e.reason()),
        }
    }

    // Simulate a restart in the middle of brewing.
    let checkpoint = engine.checkpoint();
    println!("\nCheckpoint {}:\n{}\n", checkpoint.id, checkpoint.to_json()?);
    let storage = engine.into_storage();

    let mut engine = EngineBuilder::new(device::vendor()?, storage)
        .resume_from(checkpoint)
        .build()?;
    println!("Resumed at {}", engine.current_state());

    for symbol in [BREW, COLLECT] {
        let committed = engine.apply(symbol, &Params::none())?;
        let marker = if committed.is_accepting() { " (accepting)" } else { "" };
        println!("  ✓ {}{marker}", committed.entry.arrow());
    }

    println!("\n{}\n", engine.summary());
    println!("Latest entries:");
    for entry in engine.recent(3) {
        println!("  #{} {}", entry.sequence, entry.arrow());
    }

    println!("\n{}", engine.export(ExportFormat::Text)?);
    Ok(())
}
