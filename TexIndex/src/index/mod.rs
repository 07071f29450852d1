//! Texture directory indexing
//!
//! Walks the custom texture root and maps each logical texture name (the
//! file stem, case-sensitive) to the file that provides it. Names are
//! matched across formats: `foo.png` and `foo.jpg` both claim `foo`. The
//! winner is picked by extension priority (`png`, `jpg`, `jpeg`, `tga`) and
//! then by traversal order, so a `.png` anywhere beats a `.jpg` of the same
//! name.

pub mod filter;
pub mod summary;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::utils::path::display_relative;

pub use filter::{EligibilityFilter, TEXTURE_EXTENSIONS, extension_rank, has_texture_extension};
pub use summary::{IndexSummary, SummaryGroup};

/// Logical texture name → file path, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureIndex {
    entries: IndexMap<String, PathBuf>,
}

impl TextureIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name unless it is already present.
    ///
    /// Returns the rejected path when the name was taken; the existing entry
    /// is left untouched.
    pub fn insert_first(&mut self, name: String, path: PathBuf) -> Result<(), PathBuf> {
        match self.entries.entry(name) {
            indexmap::map::Entry::Occupied(_) => Err(path),
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(path);
                Ok(())
            }
        }
    }

    /// Look up the file for a logical name (exact match)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Check if a logical name is indexed
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of indexed names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(String, PathBuf)> for TextureIndex {
    /// Collect pairs, keeping the first path seen for each name
    fn from_iter<I: IntoIterator<Item = (String, PathBuf)>>(iter: I) -> Self {
        let mut index = TextureIndex::new();
        for (name, path) in iter {
            let _ = index.insert_first(name, path);
        }
        index
    }
}

/// A texture name claimed by more than one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTexture {
    /// The contested logical name
    pub name: String,
    /// The path that stays in the index
    pub kept: PathBuf,
    /// The path that was dropped
    pub ignored: PathBuf,
}

/// Result of walking the texture root
#[derive(Debug, Clone, Default)]
pub struct IndexBuild {
    /// The name → path mapping
    pub index: TextureIndex,
    /// Eligible files matched, including ignored duplicates
    pub file_count: usize,
    /// Name collisions, in discovery order
    pub duplicates: Vec<DuplicateTexture>,
}

/// Build the texture index for a root directory.
///
/// A root that does not exist produces an empty index with a zero count.
/// Unreadable entries and non UTF-8 paths are logged and skipped.
/// Collisions keep the highest-priority extension, then the first path and are reported both in the result and as warnings.
#[must_use]
pub fn build_index(root: &Path, filter: &EligibilityFilter) -> IndexBuild {
    let mut build = IndexBuild::default();

    if !root.is_dir() {
        tracing::info!("Texture directory {} does not exist, index is empty", root.display());
        return build;
    }

    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    // Stable sort: extension priority first, traversal order within a format
    let mut files: Vec<PathBuf> = eligible_files(&root, filter).collect();
    files.sort_by_key(|path| extension_rank(path));

    for path in files {
        build.file_count += 1;

        // eligible_files only yields UTF-8 paths
        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        if let Err(ignored) = build.index.insert_first(name.clone(), path) {
            let kept = build.index.get(&name).map(Path::to_path_buf).unwrap_or_default();
            tracing::warn!(
                "Duplicate texture name '{}': using {}, ignoring {}",
                name,
                display_relative(&kept, &root),
                display_relative(&ignored, &root),
            );
            build.duplicates.push(DuplicateTexture { name, kept, ignored });
        }
    }

    tracing::debug!(
        "Indexed {} texture(s) from {} eligible file(s) under {}",
        build.index.len(),
        build.file_count,
        root.display()
    );

    build
}

/// Count eligible files without building the index.
///
/// Uses the same traversal and filter as [`build_index`], so the result is
/// comparable with [`IndexBuild::file_count`].
#[must_use]
pub fn count_eligible_files(root: &Path, filter: &EligibilityFilter) -> usize {
    if !root.is_dir() {
        return 0;
    }
    eligible_files(root, filter).count()
}

/// Last write time of the texture root, or the Unix epoch if unavailable
#[must_use]
pub fn directory_last_modified(root: &Path) -> DateTime<Utc> {
    std::fs::metadata(root)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_default()
}

/// Deterministic walk over eligible files below `root`
fn eligible_files<'a>(
    root: &'a Path,
    filter: &'a EligibilityFilter,
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            // Manifests store paths as XML text
            let utf8 = e.path().to_str().is_some();
            if !utf8 {
                tracing::warn!("Skipping texture with non UTF-8 path: {}", e.path().display());
            }
            utf8
        })
        .filter(move |e| {
            e.path()
                .strip_prefix(root)
                .is_ok_and(|relative| filter.is_eligible(relative))
        })
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"\x89PNG").unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let build = build_index(&missing, &EligibilityFilter::allow_all());
        assert!(build.index.is_empty());
        assert_eq!(build.file_count, 0);
        assert!(build.duplicates.is_empty());
        assert_eq!(count_eligible_files(&missing, &EligibilityFilter::allow_all()), 0);
    }

    #[test]
    fn test_first_discovered_wins() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a/foo.png");
        touch(temp.path(), "b/foo.jpg");

        let build = build_index(temp.path(), &EligibilityFilter::allow_all());

        assert_eq!(build.index.len(), 1);
        assert_eq!(build.file_count, 2);
        assert!(build.index.get("foo").unwrap().ends_with("a/foo.png"));

        assert_eq!(build.duplicates.len(), 1);
        let dup = &build.duplicates[0];
        assert_eq!(dup.name, "foo");
        assert!(dup.kept.ends_with("a/foo.png"));
        assert!(dup.ignored.ends_with("b/foo.jpg"));
    }

    #[test]
    fn test_png_beats_jpg_in_earlier_folder() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a/foo.jpg");
        touch(temp.path(), "b/foo.png");
        touch(temp.path(), "c/foo.tga");

        let build = build_index(temp.path(), &EligibilityFilter::allow_all());

        assert_eq!(build.file_count, 3);
        assert!(build.index.get("foo").unwrap().ends_with("b/foo.png"));
        let ignored: Vec<_> = build.duplicates.iter().map(|d| d.ignored.clone()).collect();
        assert!(ignored[0].ends_with("a/foo.jpg"));
        assert!(ignored[1].ends_with("c/foo.tga"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_paths_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let bad_dir = temp.path().join(OsStr::from_bytes(b"ui\xff"));
        fs::create_dir_all(&bad_dir).unwrap();
        fs::write(bad_dir.join("t_title.png"), b"\x89PNG").unwrap();
        touch(temp.path(), "t_ok.png");

        let filter = EligibilityFilter::allow_all();
        let build = build_index(temp.path(), &filter);

        assert_eq!(build.file_count, 1);
        assert_eq!(count_eligible_files(temp.path(), &filter), 1);
        assert!(build.index.contains("t_ok"));
        assert!(!build.index.contains("t_title"));
    }

    #[test]
    fn test_nested_and_mixed_formats() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "root_icon.png");
        touch(temp.path(), "ui/menu/bg_title.jpeg");
        touch(temp.path(), "ui/menu/cursor.TGA");
        touch(temp.path(), "ui/readme.txt");
        touch(temp.path(), "ui/menu/skip.dds");

        let build = build_index(temp.path(), &EligibilityFilter::allow_all());

        assert_eq!(build.file_count, 3);
        assert!(build.index.contains("root_icon"));
        assert!(build.index.contains("bg_title"));
        assert!(build.index.contains("cursor"));
        assert!(!build.index.contains("readme"));
        assert!(!build.index.contains("skip"));
        assert!(build.index.get("cursor").unwrap().is_absolute());
    }

    #[test]
    #[cfg_attr(target_os = "macos", ignore = "case-insensitive filesystem")]
    fn test_names_are_case_sensitive() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Hero.png");
        touch(temp.path(), "hero.png");

        let build = build_index(temp.path(), &EligibilityFilter::allow_all());
        assert_eq!(build.index.len(), 2);
        assert!(build.duplicates.is_empty());
    }

    #[test]
    fn test_filter_excludes_from_index_and_count() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "battle/fx_fire.png");
        touch(temp.path(), "characters/hero.png");
        touch(temp.path(), "launcher/logo.png");

        let filter = EligibilityFilter::allow_all().disable("battle");
        let build = build_index(temp.path(), &filter);

        assert_eq!(build.file_count, 2);
        assert!(!build.index.contains("fx_fire"));
        assert_eq!(count_eligible_files(temp.path(), &filter), build.file_count);
    }

    #[test]
    fn test_traversal_order_is_stable() {
        let temp = TempDir::new().unwrap();
        for name in ["c.png", "a.png", "b/z.png", "b/y.png"] {
            touch(temp.path(), name);
        }

        let first: Vec<String> = build_index(temp.path(), &EligibilityFilter::allow_all())
            .index
            .iter()
            .map(|(n, _)| n.to_string())
            .collect();
        let second: Vec<String> = build_index(temp.path(), &EligibilityFilter::allow_all())
            .index
            .iter()
            .map(|(n, _)| n.to_string())
            .collect();

        assert_eq!(first, vec!["a", "y", "z", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_iter_keeps_first() {
        let index: TextureIndex = vec![
            ("foo".to_string(), PathBuf::from("/t/a/foo.png")),
            ("foo".to_string(), PathBuf::from("/t/b/foo.png")),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("foo"), Some(Path::new("/t/a/foo.png")));
    }

    #[test]
    fn test_directory_last_modified_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert_eq!(directory_last_modified(&missing), DateTime::<Utc>::default());
        assert!(directory_last_modified(temp.path()) > DateTime::<Utc>::default());
    }
}
