//! Quizcrawl - level preview
//!
//! Generates one level and prints it as coloured ASCII, or as JSON for tools.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use quizcrawl::{Dungeon, DungeonGenerator, GeneratorConfig, LogObserver};

/// Generate and preview a dungeon level
#[derive(Parser, Debug)]
#[command(name = "quizcrawl")]
#[command(author, version, about = "Quizcrawl - preview a generated level", long_about = None)]
struct Args {
    /// Dungeon depth (1 = shallowest)
    #[arg(short = 'l', long = "level", default_value_t = 1)]
    level: u32,

    /// Map width in tiles
    #[arg(short = 'W', long = "width", default_value_t = 80)]
    width: i32,

    /// Map height in tiles
    #[arg(short = 'H', long = "height", default_value_t = 40)]
    height: i32,

    /// Seed for a reproducible level
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Generator config (RON)
    #[arg(short = 'c', long = "config", default_value = "assets/generator.ron")]
    config: PathBuf,

    /// Directory holding boss_<level>.json layouts
    #[arg(long = "boss-dir")]
    boss_dir: Option<PathBuf>,

    /// Print the level as JSON instead of ASCII
    #[arg(long = "json")]
    json: bool,

    /// Write the effective config to this path and exit
    #[arg(long = "write-config")]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = GeneratorConfig::load_or_default(&args.config);
    if let Some(dir) = args.boss_dir {
        config.boss_level_dir = Some(dir);
    }

    if let Some(path) = args.write_config {
        config
            .save(&path)
            .with_context(|| format!("writing config to {}", path.display()))?;
        log::info!("Config written to {}", path.display());
        return Ok(());
    }

    let generator = DungeonGenerator::new(config).with_observer(LogObserver);
    let dungeon = generator.generate(args.level, args.width, args.height, args.seed);

    let mut stdout = io::stdout();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &dungeon).context("serializing level")?;
        writeln!(stdout)?;
    } else {
        print_level(&mut stdout, &dungeon)?;
    }
    stdout.flush()?;
    Ok(())
}

/// Tiles in their own colour; monsters, items and graffiti stand out on top
fn print_level(out: &mut impl Write, dungeon: &Dungeon) -> Result<()> {
    writeln!(
        out,
        "Level {} ({}) seed {}{}",
        dungeon.level,
        dungeon.theme.name(),
        dungeon.seed,
        dungeon.boss.as_deref().map(|b| format!(" boss: {}", b)).unwrap_or_default()
    )?;

    for (y, line) in dungeon.to_ascii().lines().enumerate() {
        for (x, glyph) in line.chars().enumerate() {
            let color = match dungeon.tile(x as i32, y as i32) {
                Some(tile) if tile.glyph() == glyph => {
                    let (r, g, b) = tile.fg_color(true);
                    Color::Rgb { r, g, b }
                }
                _ if glyph == 'M' || glyph == 'z' => Color::Red,
                _ => Color::Yellow,
            };
            queue!(out, SetForegroundColor(color), Print(glyph))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    Ok(())
}
