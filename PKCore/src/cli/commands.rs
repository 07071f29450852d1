//! Subcommands and their execution

use chrono::Utc;
use clap::Subcommand;
use console::{Emoji, style};
use texindex::cache::StartupOutcome;
use texindex::fingerprint::FingerprintSource;
use texindex::gate::{CacheStatus, CurrentState, validate};
use texindex::manifest::{TextureManifest, manifest_path};
use texindex::names::normalize_texture_name;

use crate::config::PluginConfig;
use crate::replacer::TextureReplacer;

/// Magnifying glass - for lookups
static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Link - for indexing
static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
/// Sparkles - for completion
static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the manifest and rebuild the index if needed
    Index {
        /// Rebuild even if the manifest is valid
        #[arg(short, long)]
        force: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List indexed textures grouped by folder
    List,

    /// Show which file replaces a texture name
    Resolve {
        /// Texture name, instance markers like "(Clone)" are stripped
        name: String,
    },

    /// Print the fingerprint of the current texture config
    Fingerprint,

    /// Show the stored manifest and whether it is still valid
    Manifest,
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the config paths cannot be resolved or the
    /// manifest cannot be read.
    pub fn execute(&self, config: PluginConfig) -> anyhow::Result<()> {
        match self {
            Commands::Index { force, json } => index(config, *force, *json),
            Commands::List => list(config),
            Commands::Resolve { name } => resolve(config, name),
            Commands::Fingerprint => {
                fingerprint(&config);
                Ok(())
            }
            Commands::Manifest => manifest(&config),
        }
    }
}

fn index(config: PluginConfig, force: bool, json: bool) -> anyhow::Result<()> {
    let mut replacer = TextureReplacer::new(config)?;
    let outcome = if force { replacer.reset() } else { replacer.on_startup() };

    if json {
        println!("{}", replacer.report().to_json()?);
        return Ok(());
    }

    match outcome {
        StartupOutcome::Valid => println!("{}Manifest is valid", LINK),
        StartupOutcome::Rebuilt(reason) => println!("{}Rebuilt index ({})", LINK, reason),
    }
    let report = replacer.report();
    match report.duplicates {
        Some(duplicates) => println!(
            "{}{} texture(s), {} duplicate name(s)",
            SPARKLE,
            style(report.textures).bold(),
            duplicates
        ),
        None => println!("{}{} texture(s)", SPARKLE, style(report.textures).bold()),
    }
    let cache = replacer.cache();
    println!("  Manifest: {}", cache.manifest_path().display());
    Ok(())
}

fn list(config: PluginConfig) -> anyhow::Result<()> {
    let mut replacer = TextureReplacer::new(config)?;
    replacer.on_startup();

    let summary = replacer.cache().summary();
    if summary.total == 0 {
        println!("No custom textures found in {}", replacer.cache().root().display());
        return Ok(());
    }

    for group in &summary.groups {
        println!("{}", style(format!("{}/", group.folder)).bold());
        for file in &group.files {
            println!("  {file}");
        }
    }
    println!("{} texture(s)", style(summary.total).bold());
    Ok(())
}

fn resolve(config: PluginConfig, name: &str) -> anyhow::Result<()> {
    let mut replacer = TextureReplacer::new(config)?;
    replacer.on_startup();

    let normalized = normalize_texture_name(name);
    match replacer.cache().resolve(normalized) {
        Some(path) => println!("{}{} -> {}", LOOKING_GLASS, normalized, path.display()),
        None => println!("{}{}: no replacement", LOOKING_GLASS, style(normalized).dim()),
    }
    Ok(())
}

fn fingerprint(config: &PluginConfig) {
    println!("{}", config.fingerprint());
    println!(
        "  {}",
        style(config.textures.fingerprint_values().join("|")).dim()
    );
}

fn manifest(config: &PluginConfig) -> anyhow::Result<()> {
    let settings = config.cache_settings()?;
    let path = manifest_path(&settings.cache_dir);
    let manifest = TextureManifest::load(&path)?;

    let now = Utc::now();
    let age = now - manifest.build_time;
    println!("Manifest:      {}", path.display());
    println!("Built:         {} ({:.1} hours ago)", manifest.build_time, age.num_minutes() as f64 / 60.0);
    println!("Last modified: {}", manifest.last_modified);
    println!("Config hash:   {}", manifest.config_hash);
    println!("File count:    {}", manifest.file_count);
    println!("Entries:       {}", manifest.entry_count());

    let textures_dir = std::path::absolute(&settings.textures_dir)?;
    let fingerprint = settings.fingerprint.with_root(&textures_dir);
    let current = CurrentState::observe(&textures_dir, &settings.filter, fingerprint);
    let status = validate(&manifest, &current, now, &settings.policy);
    match status {
        CacheStatus::Valid => println!("Status:        {}", style("valid").green()),
        CacheStatus::Rebuild(reason) => {
            println!("Status:        {} ({})", style("stale").yellow(), reason);
        }
    }
    Ok(())
}
