//! ASCII preview of a generated world map.
//!
//! Usage: `preview [config.toml]`. Without an argument the stock
//! configuration is used. Water renders as `~`, walkable land as `.`,
//! and entities by their catalog group (`$` resources, `^` landmarks,
//! `"` flora, `!` enemies).

use std::process::ExitCode;

use ridgeline::{WorldConfig, WorldError, WorldMap};

fn glyph_for(code: u16) -> char {
    match code / 100 {
        1 => '$',
        2 => '^',
        3 => '"',
        4 => '!',
        _ => '?',
    }
}

fn run() -> Result<(), WorldError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| WorldError::InvalidConfig(format!("{path}: {e}")))?;
            WorldConfig::from_toml_str(&text)?
        }
        None => WorldConfig::default(),
    };

    let world = WorldMap::from_config(&config)?;
    let entities = world.entities_snapshot();

    println!(
        "{}  {}x{}  waterline {:.4}  walkable {}  entities {}",
        world.name(),
        world.width(),
        world.height(),
        world.waterline(),
        world.walkable_count(),
        entities.len()
    );

    let mut line = String::with_capacity(world.width());
    for row in 0..world.height() {
        line.clear();
        for col in 0..world.width() {
            let glyph = if let Some(&code) = entities.get(&(col, row)) {
                glyph_for(code)
            } else if world.is_walkable(row, col) {
                '.'
            } else {
                '~'
            };
            line.push(glyph);
        }
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("preview: {e}");
            ExitCode::FAILURE
        }
    }
}
