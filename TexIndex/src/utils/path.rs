//! Path utilities

use std::path::Path;

/// Normalize path separators to forward slashes (for logs and manifests)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

/// Relative path when `path` is under `base`, otherwise the full path
pub fn display_relative(path: &Path, base: &Path) -> String {
    relative_path(path, base).unwrap_or_else(|| normalize_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let base = Path::new("/textures");
        assert_eq!(
            relative_path(Path::new("/textures/ui/a.png"), base),
            Some("ui/a.png".to_string())
        );
        assert_eq!(relative_path(Path::new("/other/a.png"), base), None);
        assert_eq!(display_relative(Path::new("/other/a.png"), base), "/other/a.png");
    }
}
