//! PKCore CLI - inspect and rebuild the custom texture index

pub mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::PluginConfig;

#[derive(Parser)]
#[command(name = "pkcore")]
#[command(about = "PKCore: custom texture index tools for Suikoden I & II HD Remaster", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the texture root directory
    #[arg(long, global = true)]
    textures: Option<PathBuf>,

    /// Override the cache directory holding the manifest
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Load the config file and apply path overrides
    fn load_config(&self) -> anyhow::Result<PluginConfig> {
        let path = self.config.clone().or_else(PluginConfig::default_path);
        let mut config = match path {
            Some(path) => PluginConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => PluginConfig::default(),
        };

        if let Some(dir) = &self.textures {
            config.paths.textures_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.cache {
            config.paths.cache_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

/// Run the PKCore CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.load_config()?;
    cli.command.execute(config)?;

    Ok(())
}
