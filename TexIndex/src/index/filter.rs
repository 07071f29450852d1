//! Which files under the texture root are eligible for indexing

use std::collections::BTreeSet;
use std::path::{Component, Path};

/// File extensions accepted as replacement textures (compared case-insensitively).
pub const TEXTURE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "tga"];

/// Check whether a path has one of the [`TEXTURE_EXTENSIONS`]
#[must_use]
pub fn has_texture_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEXTURE_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
}

/// Priority of a file's extension when names collide, lower wins.
///
/// Follows the order of [`TEXTURE_EXTENSIONS`]; unknown extensions sort last.
#[must_use]
pub fn extension_rank(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| TEXTURE_EXTENSIONS.iter().position(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(TEXTURE_EXTENSIONS.len())
}

/// Category folders excluded from the index.
///
/// A file is ineligible when any directory between the texture root and the
/// file is named like a disabled category (ASCII case-insensitive). The
/// toggles that produce a filter must also feed the config fingerprint,
/// otherwise a stale manifest could outlive a filter change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityFilter {
    disabled: BTreeSet<String>,
}

impl EligibilityFilter {
    /// A filter that accepts every texture file
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Exclude every file below a folder with this name
    #[must_use]
    pub fn disable(mut self, category: impl AsRef<str>) -> Self {
        self.disabled.insert(category.as_ref().to_ascii_lowercase());
        self
    }

    /// Disabled category names, lowercased and sorted
    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.disabled.iter().map(String::as_str)
    }

    /// Check whether a file (given relative to the texture root) may be indexed
    #[must_use]
    pub fn allows(&self, relative: &Path) -> bool {
        if self.disabled.is_empty() {
            return true;
        }

        let Some(parent) = relative.parent() else {
            return true;
        };

        !parent.components().any(|c| match c {
            Component::Normal(name) => name
                .to_str()
                .is_some_and(|n| self.disabled.contains(&n.to_ascii_lowercase())),
            _ => false,
        })
    }

    /// Full eligibility check: allowed extension and not in a disabled folder
    #[must_use]
    pub fn is_eligible(&self, relative: &Path) -> bool {
        has_texture_extension(relative) && self.allows(relative)
    }
}
