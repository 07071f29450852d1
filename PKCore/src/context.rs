//! Which game the remaster collection is currently running

use std::fmt;

/// Active game inside the collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameContext {
    /// Title / game selection screen
    #[default]
    Launcher,
    /// Suikoden I
    Gsd1,
    /// Suikoden II
    Gsd2,
}

impl GameContext {
    /// Derive the context from an active scene name
    #[must_use]
    pub fn from_scene(scene: &str) -> Self {
        if scene.contains("GSD1") {
            Self::Gsd1
        } else if scene.contains("GSD2") {
            Self::Gsd2
        } else {
            Self::Launcher
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Launcher => "Launcher",
            Self::Gsd1 => "GSD1",
            Self::Gsd2 => "GSD2",
        }
    }
}

impl fmt::Display for GameContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Turns a stream of scene names into context-change events
#[derive(Debug, Default)]
pub struct ContextTracker {
    current: GameContext,
    last_scene: Option<String>,
}

impl ContextTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the active scene.
    ///
    /// Returns the new context only when both the scene name and the derived
    /// context changed.
    pub fn observe(&mut self, scene: &str) -> Option<GameContext> {
        if self.last_scene.as_deref() == Some(scene) {
            return None;
        }
        self.last_scene = Some(scene.to_string());

        let detected = GameContext::from_scene(scene);
        if detected == self.current {
            return None;
        }

        tracing::info!("Game detected: {} (Scene: {})", detected, scene);
        self.current = detected;
        Some(detected)
    }

    #[must_use]
    pub fn current(&self) -> GameContext {
        self.current
    }
}
