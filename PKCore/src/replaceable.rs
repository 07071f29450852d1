//! One-time logging of texture names the game asks for
//!
//! Helps texture authors discover which names they can replace.

use std::collections::HashSet;
use std::fmt;

/// Kind of asset a texture request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Sprite,
    UiSprite,
    UiOverrideSprite,
    Texture,
    UiTexture,
}

impl AssetKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sprite => "Sprite",
            Self::UiSprite => "UI Sprite",
            Self::UiOverrideSprite => "UI Override Sprite",
            Self::Texture => "Texture",
            Self::UiTexture => "UI Texture",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Remembers which `(kind, name)` pairs were already reported
#[derive(Debug, Default)]
pub struct ReplaceableLog {
    enabled: bool,
    seen: HashSet<(AssetKind, String)>,
}

impl ReplaceableLog {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            seen: HashSet::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Report a requested texture. Returns `true` if this was its first sighting
    /// and a line was logged.
    pub fn record(&mut self, kind: AssetKind, name: &str) -> bool {
        if !self.enabled {
            return false;
        }
        if self.seen.contains(&(kind, name.to_string())) {
            return false;
        }
        self.seen.insert((kind, name.to_string()));
        tracing::info!("[Replaceable {}] {}", kind, name);
        true
    }

    /// Number of distinct pairs reported so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logs_nothing() {
        let mut log = ReplaceableLog::new(false);
        assert!(!log.record(AssetKind::Sprite, "t_title"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_logs_once_per_kind_and_name() {
        let mut log = ReplaceableLog::new(true);
        assert!(log.record(AssetKind::Sprite, "t_title"));
        assert!(!log.record(AssetKind::Sprite, "t_title"));
        assert!(log.record(AssetKind::UiTexture, "t_title"));
        assert!(log.record(AssetKind::Sprite, "t_menu"));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AssetKind::UiOverrideSprite.to_string(), "UI Override Sprite");
    }
}
