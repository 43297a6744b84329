//! TransGen CLI - command-line interface for transition generation

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;

use crate::generator::{GeneratorConfig, TransitionGenerator};

#[derive(Parser, Debug)]
#[command(name = "transgen", version)]
#[command(about = "Generate UO Landscaper Transition XML.", long_about = None)]
pub struct Cli {
    /// Specify the input Transition XML file to use
    #[arg(short = 'i', long)]
    pub input_transitions: PathBuf,

    /// Specify Terrain A name or ID.
    #[arg(short = 'a', long)]
    pub terrain_a: String,

    /// Specify Terrain B name or ID. If not used Transitions for all Terrains are generated.
    #[arg(short = 'b', long)]
    pub terrain_b: Option<String>,

    /// Config file (defaults to ./transgen.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Terrain registry XML (default: terrain.xml)
    #[arg(long)]
    pub terrain_file: Option<PathBuf>,

    /// Transition-type registry XML (default: data/transition_types.xml)
    #[arg(long)]
    pub transition_types: Option<PathBuf>,

    /// Output directory (default: output)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v`/`-q`.
    #[must_use]
    pub fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }

    /// Build the generator config: explicit `--config`, else a discovered
    /// `transgen.toml`, with path flags applied on top.
    ///
    /// # Errors
    /// Returns an error if the config file is unreadable or invalid.
    pub fn generator_config(&self) -> crate::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::discover(".")?,
        };
        if let Some(path) = &self.terrain_file {
            config.terrain_file.clone_from(path);
        }
        if let Some(path) = &self.transition_types {
            config.transition_types_file.clone_from(path);
        }
        if let Some(path) = &self.output_dir {
            config.output_dir.clone_from(path);
        }
        Ok(config)
    }
}

/// Install the process-wide log subscriber (`LEVEL message`).
pub fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

/// Run the TransGen CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.generator_config()?;
    tracing::debug!("Using config: {:?}", config);

    let generator = TransitionGenerator::new(config, &cli.input_transitions)?;
    generator.run(&cli.terrain_a, cli.terrain_b.as_deref())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required_and_optional_args() {
        let cli = Cli::try_parse_from(["transgen", "-i", "in.xml", "-a", "Dirt"]).unwrap();
        assert_eq!(cli.input_transitions, PathBuf::from("in.xml"));
        assert_eq!(cli.terrain_a, "Dirt");
        assert!(cli.terrain_b.is_none());
        assert_eq!(cli.log_level(), Level::INFO);

        let cli = Cli::try_parse_from([
            "transgen",
            "--input-transitions",
            "in.xml",
            "--terrain-a",
            "0x10",
            "--terrain-b",
            "Grass",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.terrain_b.as_deref(), Some("Grass"));
        assert_eq!(cli.log_level(), Level::TRACE);
    }

    #[test]
    fn test_missing_required_args() {
        assert!(Cli::try_parse_from(["transgen", "-a", "Dirt"]).is_err());
        assert!(Cli::try_parse_from(["transgen", "-i", "in.xml"]).is_err());
        assert!(Cli::try_parse_from(["transgen", "-i", "x", "-a", "y", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(&config_path, "output_dir = \"from_config\"\nterrain_file = \"t.xml\"\n")
            .unwrap();

        let config_arg = config_path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "transgen",
            "-i",
            "in.xml",
            "-a",
            "Dirt",
            "--config",
            config_arg.as_str(),
            "-o",
            "from_flag",
        ])
        .unwrap();
        let config = cli.generator_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from_flag"));
        assert_eq!(config.terrain_file, PathBuf::from("t.xml"));
    }
}
