//! Folder-grouped view of an index, for startup logs and listings

use std::collections::BTreeMap;
use std::path::Path;

use super::TextureIndex;
use crate::utils::path::relative_path;

/// Label used for files directly in the texture root
pub const ROOT_LABEL: &str = "[Root]";

/// Indexed textures that live in one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryGroup {
    /// Folder relative to the texture root, or [`ROOT_LABEL`]
    pub folder: String,
    /// File names (with extension), sorted
    pub files: Vec<String>,
}

/// Index entries grouped by folder, folders and files sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub groups: Vec<SummaryGroup>,
    pub total: usize,
}

impl IndexSummary {
    /// Group an index by the parent folder of each entry
    #[must_use]
    pub fn from_index(index: &TextureIndex, root: &Path) -> Self {
        let mut folders: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (_, path) in index.iter() {
            let folder = path
                .parent()
                .and_then(|p| relative_path(p, root))
                .filter(|rel| !rel.is_empty())
                .unwrap_or_else(|| ROOT_LABEL.to_string());
            let file = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            folders.entry(folder).or_default().push(file);
        }

        let groups = folders
            .into_iter()
            .map(|(folder, mut files)| {
                files.sort();
                SummaryGroup { folder, files }
            })
            .collect();

        Self {
            groups,
            total: index.len(),
        }
    }

    /// Emit the summary at info level
    pub fn log(&self) {
        if self.total == 0 {
            tracing::info!("No custom textures found. Place PNG/JPG/TGA files in the Textures folder.");
            return;
        }

        tracing::info!("Indexed {} custom texture(s):", self.total);
        for group in &self.groups {
            tracing::info!("  {}/", group.folder);
            for file in &group.files {
                tracing::info!("    - {}", file);
            }
        }
    }
}
