//! delve: generate a dungeon layout from the command line
//!
//! Prints the layout as JSON (rooms, kept edges, routing outcomes and
//! warnings) or as a short summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};
use strum::{Display, EnumString};

use delve_core::{DungeonGenerator, GeneratorConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Format {
    Json,
    Summary,
}

/// Seeded dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a room-and-corridor dungeon layout", long_about = None)]
struct Args {
    /// JSON configuration file; missing fields take defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Random seed (overrides the configuration)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of rooms to sample (overrides the configuration)
    #[arg(short = 'n', long = "rooms")]
    rooms: Option<u32>,

    /// Share of non-tree edges put back, 0 to 1 (overrides the configuration)
    #[arg(short = 'f', long = "fraction")]
    fraction: Option<f64>,

    /// Output format: json or summary
    #[arg(long = "format", default_value_t = Format::Json)]
    format: Format,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if let Some(fraction) = self.fraction {
            config.edge_reintroduction_fraction = fraction;
        }
        Ok(config)
    }
}

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        eprintln!("{}: {}", tag, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> Result<()> {
    let args = Args::parse();

    log::set_logger(&LOGGER).context("installing logger")?;
    log::set_max_level(args.level());

    let config = args.load_config()?;
    let generator = DungeonGenerator::new(config).context("invalid configuration")?;
    let dungeon = generator.generate();

    match args.format {
        Format::Json => println!("{}", dungeon.to_json()?),
        Format::Summary => println!("{}", dungeon.summary()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_defaults() {
        let args = Args::parse_from(["delve", "--seed", "7", "--rooms", "12", "--fraction", "0.5"]);
        let config = args.load_config().unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.room_count, 12);
        assert_eq!(config.edge_reintroduction_fraction, 0.5);
        assert_eq!(config.corridor_size, GeneratorConfig::default().corridor_size);
    }

    #[test]
    fn test_format_parsing() {
        let args = Args::parse_from(["delve", "--format", "summary"]);
        assert_eq!(args.format, Format::Summary);
        assert_eq!(Args::parse_from(["delve"]).format, Format::Json);
        assert!(Args::try_parse_from(["delve", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(Args::parse_from(["delve"]).level(), LevelFilter::Warn);
        assert_eq!(Args::parse_from(["delve", "-v"]).level(), LevelFilter::Info);
        assert_eq!(Args::parse_from(["delve", "-vv"]).level(), LevelFilter::Debug);
        assert_eq!(Args::parse_from(["delve", "-vvv"]).level(), LevelFilter::Trace);
        assert_eq!(Args::parse_from(["delve", "-q"]).level(), LevelFilter::Error);
        assert!(Args::try_parse_from(["delve", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["delve", "--config", "/nonexistent/delve.json"]);
        assert!(args.load_config().is_err());
    }
}
