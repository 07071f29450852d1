//! Startup cache gate
//!
//! Decides whether the persisted manifest can stand in for a full directory
//! walk. A manifest is trusted only when the texture root's mtime, the config
//! fingerprint and the eligible file count all match what it recorded, and it
//! is younger than the policy's maximum age.
//!
//! Known limitation: replacing a file's bytes in place under the same name
//! changes none of those proxies. Such edits are picked up at the latest when
//! the manifest expires.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};

use crate::fingerprint::Fingerprint;
use crate::index::{EligibilityFilter, count_eligible_files, directory_last_modified};
use crate::manifest::TextureManifest;
use crate::error::Error;

/// Forced rebuild interval
pub const DEFAULT_MAX_AGE_HOURS: i64 = 48;

/// Tunables for manifest validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Manifests at least this old are rebuilt regardless of other checks
    pub max_age: Duration,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::hours(DEFAULT_MAX_AGE_HOURS),
        }
    }
}

/// What the texture root and config look like right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentState {
    pub last_modified: DateTime<Utc>,
    pub fingerprint: Fingerprint,
    pub file_count: usize,
}

impl CurrentState {
    /// Observe the texture root (mtime and eligible file count)
    #[must_use]
    pub fn observe(root: &Path, filter: &EligibilityFilter, fingerprint: Fingerprint) -> Self {
        Self {
            last_modified: directory_last_modified(root),
            fingerprint,
            file_count: count_eligible_files(root, filter),
        }
    }
}

/// Why the index has to be rebuilt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    /// No manifest file on disk
    NoManifest,
    /// The manifest could not be read or parsed
    Corrupt(String),
    /// The manifest reached the maximum age
    Expired { age: Duration },
    /// Texture-related config differs from the manifest
    ConfigChanged,
    /// Eligible file count differs from the manifest
    FileCountChanged { cached: usize, current: usize },
    /// The texture root was written after the manifest was built
    DirectoryModified,
    /// A rebuild was requested explicitly
    Forced,
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoManifest => write!(f, "no manifest"),
            Self::Corrupt(msg) => write!(f, "manifest unreadable ({msg})"),
            Self::Expired { age } => {
                write!(f, "build expired ({:.1} hours old)", age.num_minutes() as f64 / 60.0)
            }
            Self::ConfigChanged => write!(f, "config changed"),
            Self::FileCountChanged { cached, current } => {
                write!(f, "file count changed ({cached} -> {current})")
            }
            Self::DirectoryModified => write!(f, "texture directory modified"),
            Self::Forced => write!(f, "rebuild requested"),
        }
    }
}

/// Outcome of checking a loaded manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    Valid,
    Rebuild(RebuildReason),
}

impl CacheStatus {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Check a manifest against the current state.
///
/// Reports the first failing check, in the order: age, config fingerprint,
/// file count, directory mtime.
#[must_use]
pub fn validate(
    manifest: &TextureManifest,
    current: &CurrentState,
    now: DateTime<Utc>,
    policy: &ValidationPolicy,
) -> CacheStatus {
    let age = now - manifest.build_time;
    if age >= policy.max_age {
        return CacheStatus::Rebuild(RebuildReason::Expired { age });
    }

    if manifest.config_hash != current.fingerprint {
        return CacheStatus::Rebuild(RebuildReason::ConfigChanged);
    }

    if manifest.file_count != current.file_count {
        return CacheStatus::Rebuild(RebuildReason::FileCountChanged {
            cached: manifest.file_count,
            current: current.file_count,
        });
    }

    if manifest.last_modified != current.last_modified {
        return CacheStatus::Rebuild(RebuildReason::DirectoryModified);
    }

    CacheStatus::Valid
}

/// Result of the startup gate
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// The manifest is trustworthy; use its entries
    Valid(TextureManifest),
    /// Walk the directory and write a new manifest
    Rebuild(RebuildReason),
}

/// Run the startup gate: load the manifest, then validate it.
///
/// `observe` is only called once a manifest has been loaded, so a missing or
/// corrupt manifest costs no directory walk here.
pub fn check_manifest<F>(
    manifest_path: &Path,
    observe: F,
    now: DateTime<Utc>,
    policy: &ValidationPolicy,
) -> GateDecision
where
    F: FnOnce() -> CurrentState,
{
    let manifest = match TextureManifest::load(manifest_path) {
        Ok(m) => m,
        Err(Error::ManifestNotFound(_)) => return GateDecision::Rebuild(RebuildReason::NoManifest),
        Err(e) => {
            tracing::warn!("Failed to load manifest {}: {}", manifest_path.display(), e);
            return GateDecision::Rebuild(RebuildReason::Corrupt(e.to_string()));
        }
    };

    match validate(&manifest, &observe(), now, policy) {
        CacheStatus::Valid => GateDecision::Valid(manifest),
        CacheStatus::Rebuild(reason) => GateDecision::Rebuild(reason),
    }
}
