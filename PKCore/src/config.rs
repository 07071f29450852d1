//! Plugin configuration (`config.toml`)
//!
//! ```toml
//! [textures]
//! enable_custom_textures = true
//! log_replaceable_textures = false
//! load_launcher_ui_textures = true
//! load_battle_textures = true
//! load_character_textures = true
//! save_point_color = "default"
//!
//! [paths]
//! textures_dir = "/path/to/Textures"
//! cache_dir = "/path/to/cache"
//! ```
//!
//! Every field is optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use texindex::cache::CacheSettings;
use texindex::fingerprint::{Fingerprint, FingerprintSource};
use texindex::index::EligibilityFilter;

use crate::error::{Error, Result};

/// Folder name used under the platform data, config and cache dirs
pub const APP_DIR_NAME: &str = "PKCore";

/// Category folder toggled by `load_launcher_ui_textures`
pub const LAUNCHER_FOLDER: &str = "launcher";
/// Category folder toggled by `load_battle_textures`
pub const BATTLE_FOLDER: &str = "battle";
/// Category folder toggled by `load_character_textures`
pub const CHARACTERS_FOLDER: &str = "characters";

// Default value functions for serde
fn default_true() -> bool {
    true
}
fn default_save_point_color() -> String {
    "default".to_string()
}

/// `[textures]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureOptions {
    /// Master switch for texture replacement
    #[serde(default = "default_true")]
    pub enable_custom_textures: bool,
    /// Log each replaceable texture name the first time it is seen
    #[serde(default)]
    pub log_replaceable_textures: bool,
    #[serde(default = "default_true")]
    pub load_launcher_ui_textures: bool,
    #[serde(default = "default_true")]
    pub load_battle_textures: bool,
    #[serde(default = "default_true")]
    pub load_character_textures: bool,
    /// Save point orb color variant
    #[serde(default = "default_save_point_color")]
    pub save_point_color: String,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            enable_custom_textures: true,
            log_replaceable_textures: false,
            load_launcher_ui_textures: true,
            load_battle_textures: true,
            load_character_textures: true,
            save_point_color: default_save_point_color(),
        }
    }
}

impl TextureOptions {
    /// Folder filter matching the category toggles
    #[must_use]
    pub fn eligibility(&self) -> EligibilityFilter {
        let mut filter = EligibilityFilter::allow_all();
        if !self.load_launcher_ui_textures {
            filter = filter.disable(LAUNCHER_FOLDER);
        }
        if !self.load_battle_textures {
            filter = filter.disable(BATTLE_FOLDER);
        }
        if !self.load_character_textures {
            filter = filter.disable(CHARACTERS_FOLDER);
        }
        filter
    }
}

impl FingerprintSource for TextureOptions {
    /// launcher | battle | character | save point color
    fn fingerprint_values(&self) -> Vec<String> {
        vec![
            self.load_launcher_ui_textures.to_string(),
            self.load_battle_textures.to_string(),
            self.load_character_textures.to_string(),
            self.save_point_color.clone(),
        ]
    }
}

/// `[paths]` section. Unset paths fall back to platform directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textures_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl PathSettings {
    /// Configured texture root, or `<data dir>/PKCore/Textures`
    pub fn resolved_textures_dir(&self) -> Result<PathBuf> {
        match &self.textures_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|p| p.join(APP_DIR_NAME).join("Textures"))
                .ok_or_else(|| Error::Config("no platform data directory; set paths.textures_dir".to_string())),
        }
    }

    /// Configured cache dir, or `<cache dir>/PKCore`
    pub fn resolved_cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::cache_dir()
                .map(|p| p.join(APP_DIR_NAME))
                .ok_or_else(|| Error::Config("no platform cache directory; set paths.cache_dir".to_string())),
        }
    }
}

/// Persistable plugin configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub textures: TextureOptions,
    #[serde(default)]
    pub paths: PathSettings,
}

impl PluginConfig {
    /// Default config file location: `<config dir>/PKCore/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Load config from disk. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| Error::TomlDe {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from [`default_path`](Self::default_path), or defaults if there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Save config to disk, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Current config fingerprint
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        self.textures.fingerprint()
    }

    /// Settings for the texture index cache
    pub fn cache_settings(&self) -> Result<CacheSettings> {
        Ok(CacheSettings::new(
            self.paths.resolved_textures_dir()?,
            self.paths.resolved_cache_dir()?,
            self.fingerprint(),
        )
        .with_filter(self.textures.eligibility()))
    }
}
