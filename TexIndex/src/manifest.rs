//! Persisted texture manifest (`texture_manifest.xml`)
//!
//! Snapshot of a built index plus the metadata the cache gate needs to decide
//! whether the snapshot can be trusted on the next startup:
//!
//! ```xml
//! <TextureManifest>
//!   <LastModified>2026-10-17T09:12:44.123456789Z</LastModified>
//!   <BuildTime>2026-10-17T09:12:45.001Z</BuildTime>
//!   <ConfigHash>5f1c…</ConfigHash>
//!   <FileCount>2</FileCount>
//!   <Entries>
//!     <Entry Key="t_menu_bg" Value="/…/Textures/ui/t_menu_bg.png"/>
//!   </Entries>
//! </TextureManifest>
//! ```
//!
//! A manifest is always replaced as a whole, never patched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fingerprint::Fingerprint;
use crate::index::TextureIndex;

/// File name of the manifest inside the cache directory
pub const MANIFEST_FILE_NAME: &str = "texture_manifest.xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Location of the manifest for a cache directory
#[must_use]
pub fn manifest_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(MANIFEST_FILE_NAME)
}

/// Index snapshot with invalidation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "TextureManifest")]
pub struct TextureManifest {
    /// Texture root last write time when the manifest was built
    #[serde(rename = "LastModified")]
    pub last_modified: DateTime<Utc>,
    /// When the manifest was built
    #[serde(rename = "BuildTime")]
    pub build_time: DateTime<Utc>,
    /// Fingerprint of the texture-related config
    #[serde(rename = "ConfigHash")]
    pub config_hash: Fingerprint,
    /// Eligible texture files at build time
    #[serde(rename = "FileCount")]
    pub file_count: usize,
    #[serde(rename = "Entries", default)]
    pub entries: ManifestEntries,
}

/// Wrapper for the `<Entries>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntries {
    #[serde(rename = "Entry", default)]
    pub items: Vec<ManifestEntry>,
}

/// A single name → path pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "@Key")]
    pub key: String,
    #[serde(rename = "@Value")]
    pub value: PathBuf,
}

impl TextureManifest {
    /// Snapshot an index
    #[must_use]
    pub fn new(
        index: &TextureIndex,
        last_modified: DateTime<Utc>,
        build_time: DateTime<Utc>,
        config_hash: Fingerprint,
        file_count: usize,
    ) -> Self {
        let items = index
            .iter()
            .map(|(key, value)| ManifestEntry {
                key: key.to_string(),
                value: value.to_path_buf(),
            })
            .collect();

        Self {
            last_modified,
            build_time,
            config_hash,
            file_count,
            entries: ManifestEntries { items },
        }
    }

    /// Rebuild the in-memory index. A repeated key keeps its first value.
    #[must_use]
    pub fn to_index(&self) -> TextureIndex {
        self.entries
            .items
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    /// Number of stored entries
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.items.len()
    }

    /// Serialize to indented XML
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::from(XML_DECLARATION);
        let mut ser = quick_xml::se::Serializer::new(&mut xml);
        ser.indent(' ', 2);
        self.serialize(ser)?;
        xml.push('\n');
        Ok(xml)
    }

    /// Parse manifest XML
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Read a manifest from disk
    ///
    /// # Errors
    /// [`Error::ManifestNotFound`] when there is no file, otherwise IO or XML errors.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_xml(&content)
    }

    /// Write the manifest, replacing any previous file.
    ///
    /// The XML goes to a temporary file next to `path` first and is then
    /// renamed over it, so readers never observe a half-written manifest.
    pub fn save(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(xml.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| Error::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::debug!("Wrote manifest with {} entries to {}", self.entry_count(), path.display());
        Ok(())
    }
}
