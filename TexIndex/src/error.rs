//! Error types for `TexIndex`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `TexIndex` operations.
///
/// Most of the public cache surface never returns this type: failures are
/// logged and degrade to a rebuild or an empty index. It is surfaced by the
/// lower-level manifest functions.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the manifest's temporary file over the target failed.
    #[error("failed to persist {path}: {source}")]
    Persist {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Manifest Errors ====================
    /// The manifest XML could not be parsed or written.
    #[error("manifest XML error: {0}")]
    XmlDe(#[from] quick_xml::DeError),

    /// The manifest file does not exist.
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),
}

/// A specialized Result type for `TexIndex` operations.
pub type Result<T> = std::result::Result<T, Error>;
