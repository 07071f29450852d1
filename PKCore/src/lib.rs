//! PKCore - Custom texture replacement for Suikoden I & II HD Remaster
//!
//! Wires the [`texindex`] cache to plugin configuration and game lifecycle
//! signals. A host creates one [`TextureReplacer`] and forwards startup,
//! scene-load and texture-request events to it.
//!
//! ```no_run
//! use pkcore::{AssetKind, PluginConfig, TextureReplacer};
//!
//! let config = PluginConfig::load_default()?;
//! let mut replacer = TextureReplacer::new(config)?;
//! replacer.on_startup();
//!
//! if let Some(replacement) = replacer.replacement_for(AssetKind::Sprite, "t_title(Clone)") {
//!     println!("{} -> {}", replacement.name, replacement.path.display());
//! }
//! # Ok::<(), pkcore::Error>(())
//! ```

// Re-export texindex
pub use texindex;

pub mod config;
pub mod context;
pub mod error;
pub mod replaceable;
pub mod replacer;

pub use config::{PathSettings, PluginConfig, TextureOptions};
pub use context::{ContextTracker, GameContext};
pub use error::{Error, Result};
pub use replaceable::{AssetKind, ReplaceableLog};
pub use replacer::{IndexReport, Replacement, TextureReplacer};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
