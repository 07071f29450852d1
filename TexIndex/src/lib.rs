//! # TexIndex
//!
//! Custom texture index for Suikoden I & II HD Remaster mods.
//!
//! Replacement images live in a directory tree; the game asks for textures by
//! logical name. This crate maps names to files and keeps that map on disk so
//! that startup does not have to walk the tree every launch.
//!
//! ## Pieces
//!
//! - **Index** - recursive walk of the texture root, first-found-wins per name
//! - **Fingerprint** - SHA-256 over the texture-related config values
//! - **Manifest** - `texture_manifest.xml` snapshot of the index plus metadata
//! - **Gate** - decides whether a manifest is still trustworthy
//! - **Cache** - the owned object a host drives from its lifecycle signals
//!
//! ## Quick Start
//!
//! ```no_run
//! use texindex::prelude::*;
//!
//! let fingerprint = Fingerprint::compute(["true", "true", "true", "default"]);
//! let settings = CacheSettings::new("Textures", "Cache", fingerprint);
//!
//! let mut cache = TextureIndexCache::new(settings);
//! match cache.initialize() {
//!     StartupOutcome::Valid => println!("Loaded {} textures from manifest", cache.len()),
//!     StartupOutcome::Rebuilt(reason) => println!("Rebuilt index: {reason}"),
//! }
//!
//! // Engine-decorated names resolve to the same file
//! let bytes = cache.read_bytes("t_menu_bg(Clone)");
//! ```

pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod gate;
pub mod index;
pub mod manifest;
pub mod names;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::cache::{CacheSettings, StartupOutcome, TextureIndexCache};
    pub use crate::fingerprint::{Fingerprint, FingerprintSource};
    pub use crate::gate::{
        CacheStatus, CurrentState, GateDecision, RebuildReason, ValidationPolicy,
        check_manifest, validate,
    };
    pub use crate::index::{
        EligibilityFilter, IndexBuild, IndexSummary, TextureIndex,
        build_index, count_eligible_files, directory_last_modified,
    };
    pub use crate::manifest::{TextureManifest, manifest_path};
    pub use crate::names::normalize_texture_name;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
