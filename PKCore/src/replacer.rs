//! Texture replacement service
//!
//! [`TextureReplacer`] owns the config, the texture index cache, the game
//! context tracker and the replaceable log. The host calls its signal
//! methods; none of them fail.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use texindex::cache::{StartupOutcome, TextureIndexCache};
use texindex::names::normalize_texture_name;

use crate::config::PluginConfig;
use crate::context::{ContextTracker, GameContext};
use crate::error::Result;
use crate::replaceable::{AssetKind, ReplaceableLog};

/// A texture to use instead of the game's own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Normalized logical name
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Serializable snapshot of the index state
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// `valid` or `rebuilt`
    pub outcome: String,
    /// Rebuild reason, if the index was rebuilt
    pub reason: Option<String>,
    pub textures: usize,
    /// Name collisions; only known after a directory walk, `None` when the
    /// index came from a manifest
    pub duplicates: Option<usize>,
    pub textures_dir: PathBuf,
    pub manifest: PathBuf,
    pub fingerprint: String,
}

impl IndexReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct TextureReplacer {
    config: PluginConfig,
    cache: TextureIndexCache,
    context: ContextTracker,
    replaceable: ReplaceableLog,
}

impl TextureReplacer {
    /// Create the service. Nothing is read from disk until [`on_startup`](Self::on_startup).
    pub fn new(config: PluginConfig) -> Result<Self> {
        let cache = TextureIndexCache::new(config.cache_settings()?);
        let replaceable = ReplaceableLog::new(config.textures.log_replaceable_textures);
        Ok(Self {
            config,
            cache,
            context: ContextTracker::new(),
            replaceable,
        })
    }

    /// Startup signal: make sure the directories exist, then validate or rebuild
    pub fn on_startup(&mut self) -> StartupOutcome {
        if !self.config.textures.enable_custom_textures {
            tracing::info!("Custom textures are disabled");
        }

        let settings = self.cache.settings();
        ensure_dir(&settings.textures_dir);
        ensure_dir(&settings.cache_dir);

        let outcome = self.cache.initialize();
        self.cache.summary().log();
        outcome
    }

    /// Scene signal: a change of game context forces a rebuild
    pub fn on_scene_loaded(&mut self, scene: &str) -> Option<GameContext> {
        let context = self.context.observe(scene)?;
        self.reset();
        Some(context)
    }

    /// Reset signal: rebuild from disk and rewrite the manifest
    pub fn reset(&mut self) -> StartupOutcome {
        self.cache.reset()
    }

    /// Replacement for a texture the game is about to use.
    ///
    /// `raw_name` may carry engine instance markers. Returns `None` when
    /// replacement is disabled, when no file is indexed under the name, or
    /// when the file cannot be read.
    pub fn replacement_for(&mut self, kind: AssetKind, raw_name: &str) -> Option<Replacement> {
        self.replaceable.record(kind, raw_name);

        if !self.config.textures.enable_custom_textures {
            return None;
        }

        let name = normalize_texture_name(raw_name);
        let (path, bytes) = self.cache.read_texture(name)?;
        tracing::debug!("Replacing {} {} with {}", kind, name, path.display());
        Some(Replacement {
            name: name.to_string(),
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Snapshot for reporting.
    ///
    /// Duplicates are found during a walk and are not stored in the
    /// manifest, so they are only reported after a rebuild.
    #[must_use]
    pub fn report(&self) -> IndexReport {
        let (outcome, reason) = match self.cache.last_outcome() {
            Some(StartupOutcome::Valid) => ("valid", None),
            Some(StartupOutcome::Rebuilt(reason)) => ("rebuilt", Some(reason.to_string())),
            None => ("uninitialized", None),
        };
        IndexReport {
            outcome: outcome.to_string(),
            reason,
            textures: self.cache.len(),
            duplicates: match self.cache.last_outcome() {
                Some(StartupOutcome::Rebuilt(_)) => Some(self.cache.duplicates().len()),
                _ => None,
            },
            textures_dir: self.cache.root().to_path_buf(),
            manifest: self.cache.manifest_path(),
            fingerprint: self.cache.effective_fingerprint().to_string(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &TextureIndexCache {
        &self.cache
    }

    #[must_use]
    pub fn current_context(&self) -> GameContext {
        self.context.current()
    }
}

fn ensure_dir(dir: &Path) {
    if dir.is_dir() {
        return;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => tracing::info!("Created directory {}", dir.display()),
        Err(e) => tracing::warn!("Failed to create {}: {}", dir.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use texindex::gate::RebuildReason;

    fn config_in(temp: &TempDir) -> PluginConfig {
        let mut config = PluginConfig::default();
        config.paths.textures_dir = Some(temp.path().join("Textures"));
        config.paths.cache_dir = Some(temp.path().join("Cache"));
        config
    }

    fn add_texture(temp: &TempDir, relative: &str, bytes: &[u8]) {
        let path = temp.path().join("Textures").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_startup_creates_directories() {
        let temp = TempDir::new().unwrap();
        let mut replacer = TextureReplacer::new(config_in(&temp)).unwrap();

        assert_eq!(replacer.on_startup(), StartupOutcome::Rebuilt(RebuildReason::NoManifest));
        assert!(temp.path().join("Textures").is_dir());
        assert!(temp.path().join("Cache").join("texture_manifest.xml").is_file());
        assert!(replacer.cache().is_empty());
    }

    #[test]
    fn test_replacement_for_decorated_name() {
        let temp = TempDir::new().unwrap();
        add_texture(&temp, "ui/t_title.png", b"png bytes");

        let mut replacer = TextureReplacer::new(config_in(&temp)).unwrap();
        replacer.on_startup();

        let replacement = replacer.replacement_for(AssetKind::Sprite, "t_title(Clone)").unwrap();
        assert_eq!(replacement.name, "t_title");
        assert_eq!(replacement.bytes, b"png bytes".to_vec());
        assert!(replacement.path.ends_with("ui/t_title.png"));

        assert_eq!(replacer.replacement_for(AssetKind::Texture, "t_unknown"), None);
    }

    #[test]
    fn test_disabled_replacement() {
        let temp = TempDir::new().unwrap();
        add_texture(&temp, "t_title.png", b"png bytes");

        let mut config = config_in(&temp);
        config.textures.enable_custom_textures = false;
        let mut replacer = TextureReplacer::new(config).unwrap();
        replacer.on_startup();

        assert_eq!(replacer.replacement_for(AssetKind::Sprite, "t_title"), None);
    }

    #[test]
    fn test_context_change_rebuilds() {
        let temp = TempDir::new().unwrap();
        let mut replacer = TextureReplacer::new(config_in(&temp)).unwrap();
        replacer.on_startup();

        add_texture(&temp, "t_late.png", b"late");
        assert_eq!(replacer.on_scene_loaded("Title"), None);
        assert_eq!(replacer.replacement_for(AssetKind::Sprite, "t_late"), None);

        assert_eq!(replacer.on_scene_loaded("GSD1_Field"), Some(GameContext::Gsd1));
        assert_eq!(replacer.current_context(), GameContext::Gsd1);
        assert!(replacer.replacement_for(AssetKind::Sprite, "t_late").is_some());
    }

    #[test]
    fn test_report() {
        let temp = TempDir::new().unwrap();
        add_texture(&temp, "a/foo.png", b"1");
        add_texture(&temp, "b/foo.png", b"2");

        let mut replacer = TextureReplacer::new(config_in(&temp)).unwrap();
        assert_eq!(replacer.report().outcome, "uninitialized");

        replacer.on_startup();
        let report = replacer.report();
        assert_eq!(report.outcome, "rebuilt");
        assert_eq!(report.reason.as_deref(), Some("no manifest"));
        assert_eq!(report.textures, 1);
        assert_eq!(report.duplicates, Some(1));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"textures\": 1"));
    }

    #[test]
    fn test_report_duplicates_unknown_after_manifest_load() {
        let temp = TempDir::new().unwrap();
        add_texture(&temp, "a/foo.png", b"1");
        add_texture(&temp, "b/foo.png", b"2");

        TextureReplacer::new(config_in(&temp)).unwrap().on_startup();

        let mut replacer = TextureReplacer::new(config_in(&temp)).unwrap();
        assert_eq!(replacer.on_startup(), StartupOutcome::Valid);
        let report = replacer.report();
        assert_eq!(report.textures, 1);
        assert_eq!(report.duplicates, None);
    }

    #[test]
    fn test_unreadable_replacement_is_skipped() {
        let temp = TempDir::new().unwrap();
        add_texture(&temp, "t_gone.png", b"gone");

        let mut replacer = TextureReplacer::new(config_in(&temp)).unwrap();
        replacer.on_startup();
        fs::remove_file(temp.path().join("Textures/t_gone.png")).unwrap();

        assert_eq!(replacer.replacement_for(AssetKind::Sprite, "t_gone"), None);
    }
}
