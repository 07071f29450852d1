//! Owned texture index cache
//!
//! One [`TextureIndexCache`] is created by the host's composition root and
//! handed to every signal handler. Its signal methods never fail: IO and
//! parse problems are logged and resolved to a rebuild, an empty index, or
//! a missing lookup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::fingerprint::Fingerprint;
use crate::gate::{CurrentState, GateDecision, RebuildReason, ValidationPolicy, check_manifest};
use crate::index::{
    DuplicateTexture, EligibilityFilter, IndexSummary, TextureIndex, build_index,
    directory_last_modified,
};
use crate::manifest::{TextureManifest, manifest_path};
use crate::names::normalize_texture_name;

/// Everything the cache needs to know about its environment
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Root of the custom texture tree
    pub textures_dir: PathBuf,
    /// Directory holding `texture_manifest.xml`
    pub cache_dir: PathBuf,
    /// Folder categories excluded from the index
    pub filter: EligibilityFilter,
    /// Fingerprint of the texture-related config
    pub fingerprint: Fingerprint,
    pub policy: ValidationPolicy,
}

impl CacheSettings {
    /// Settings with no filter and the default policy
    #[must_use]
    pub fn new(textures_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>, fingerprint: Fingerprint) -> Self {
        Self {
            textures_dir: textures_dir.into(),
            cache_dir: cache_dir.into(),
            filter: EligibilityFilter::allow_all(),
            fingerprint,
            policy: ValidationPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: EligibilityFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// How the live index was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    /// Loaded from a manifest that passed validation
    Valid,
    /// Built from a fresh directory walk; a new manifest was written
    Rebuilt(RebuildReason),
}

impl StartupOutcome {
    #[must_use]
    pub fn is_rebuilt(&self) -> bool {
        matches!(self, Self::Rebuilt(_))
    }
}

/// Logical texture name → file, backed by a validated manifest
#[derive(Debug)]
pub struct TextureIndexCache {
    settings: CacheSettings,
    /// Absolute form of `settings.textures_dir`
    root: PathBuf,
    index: TextureIndex,
    duplicates: Vec<DuplicateTexture>,
    last_outcome: Option<StartupOutcome>,
}

impl TextureIndexCache {
    /// Create an empty cache. Nothing is read until [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(settings: CacheSettings) -> Self {
        let root = absolute_or_same(&settings.textures_dir);
        Self {
            settings,
            root,
            index: TextureIndex::new(),
            duplicates: Vec::new(),
            last_outcome: None,
        }
    }

    /// Startup signal: trust the manifest if it validates, otherwise rebuild
    pub fn initialize(&mut self) -> StartupOutcome {
        self.initialize_at(Utc::now())
    }

    /// [`initialize`](Self::initialize) with an explicit clock
    pub fn initialize_at(&mut self, now: DateTime<Utc>) -> StartupOutcome {
        let manifest_path = self.manifest_path();
        let root = &self.root;
        let filter = &self.settings.filter;
        let fingerprint = self.effective_fingerprint();

        let decision = check_manifest(
            &manifest_path,
            || CurrentState::observe(root, filter, fingerprint),
            now,
            &self.settings.policy,
        );

        let outcome = match decision {
            GateDecision::Valid(manifest) => {
                self.index = manifest.to_index();
                self.duplicates.clear();
                tracing::info!(
                    "Loaded {} texture(s) from manifest {}",
                    self.index.len(),
                    manifest_path.display()
                );
                StartupOutcome::Valid
            }
            GateDecision::Rebuild(reason) => {
                tracing::info!("{} - rebuilding texture index", capitalize(&reason.to_string()));
                self.rebuild_at(now, reason)
            }
        };

        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Reset signal: drop the current index and rebuild from disk
    pub fn reset(&mut self) -> StartupOutcome {
        self.reset_at(Utc::now())
    }

    /// [`reset`](Self::reset) with an explicit clock
    pub fn reset_at(&mut self, now: DateTime<Utc>) -> StartupOutcome {
        tracing::info!("Texture index reset requested");
        let outcome = self.rebuild_at(now, RebuildReason::Forced);
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Swap in new settings derived from a changed config.
    ///
    /// The live index is kept; the next initialize or reset applies them.
    pub fn reconfigure(&mut self, settings: CacheSettings) {
        self.root = absolute_or_same(&settings.textures_dir);
        self.settings = settings;
    }

    fn rebuild_at(&mut self, now: DateTime<Utc>, reason: RebuildReason) -> StartupOutcome {
        // Read the mtime before walking so writes during the walk invalidate the result
        let last_modified = directory_last_modified(&self.root);
        let build = build_index(&self.root, &self.settings.filter);

        let manifest = TextureManifest::new(
            &build.index,
            last_modified,
            now,
            self.effective_fingerprint(),
            build.file_count,
        );
        let path = self.manifest_path();
        if let Err(e) = manifest.save(&path) {
            tracing::error!("Failed to save manifest {}: {}", path.display(), e);
        }

        self.index = build.index;
        self.duplicates = build.duplicates;
        StartupOutcome::Rebuilt(reason)
    }

    /// Resolve a (possibly decorated) texture name to its replacement file
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.index.get(normalize_texture_name(name))
    }

    /// Resolve a name and read the replacement file.
    ///
    /// `None` when there is no replacement or the file cannot be read; the
    /// latter is logged.
    #[must_use]
    pub fn read_texture(&self, name: &str) -> Option<(&Path, Vec<u8>)> {
        let path = self.resolve(name)?;
        match fs::read(path) {
            Ok(bytes) => Some((path, bytes)),
            Err(e) => {
                tracing::error!("Error loading texture {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Bytes of the replacement file, see [`read_texture`](Self::read_texture)
    #[must_use]
    pub fn read_bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.read_texture(name).map(|(_, bytes)| bytes)
    }

    /// Config fingerprint bound to the absolute texture root; this is what
    /// manifests record as `ConfigHash`.
    #[must_use]
    pub fn effective_fingerprint(&self) -> Fingerprint {
        self.settings.fingerprint.with_root(&self.root)
    }

    /// The live index
    #[must_use]
    pub fn index(&self) -> &TextureIndex {
        &self.index
    }

    /// Name collisions from the last walk (empty after a manifest load)
    #[must_use]
    pub fn duplicates(&self) -> &[DuplicateTexture] {
        &self.duplicates
    }

    /// Outcome of the last initialize or reset
    #[must_use]
    pub fn last_outcome(&self) -> Option<&StartupOutcome> {
        self.last_outcome.as_ref()
    }

    /// Absolute texture root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Where the manifest lives
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        manifest_path(&self.settings.cache_dir)
    }

    /// Folder-grouped view of the live index
    #[must_use]
    pub fn summary(&self) -> IndexSummary {
        IndexSummary::from_index(&self.index, &self.root)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn absolute_or_same(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
