//! Utility functions

pub mod path;

pub use path::{display_relative, normalize_path, relative_path};
