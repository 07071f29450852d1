//! Config fingerprints for manifest invalidation
//!
//! A fingerprint is a SHA-256 digest over the ordered, `|`-joined config
//! values that decide which textures are eligible. It must be identical
//! across processes and machines, so `std::hash` (randomly seeded per
//! process) is never used here.

use std::fmt::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::utils::path::normalize_path;

/// Separator placed between config values before hashing
pub const SEPARATOR: char = '|';

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 64;

/// Anything that can list its texture-affecting settings in a fixed order
pub trait FingerprintSource {
    /// Config values in a stable order. Reordering them changes the fingerprint.
    fn fingerprint_values(&self) -> Vec<String>;

    /// Fingerprint of [`fingerprint_values`](Self::fingerprint_values)
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(self.fingerprint_values())
    }
}

/// Hex-encoded SHA-256 of the joined config values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash an ordered sequence of config values
    pub fn compute<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                joined.push(SEPARATOR);
            }
            joined.push_str(value.as_ref());
        }

        let digest = Sha256::digest(joined.as_bytes());

        let mut hex = String::with_capacity(FINGERPRINT_LEN);
        for b in digest {
            let _ = write!(hex, "{b:02x}");
        }
        Self(hex)
    }

    /// Wrap a fingerprint read back from a manifest
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Bind a config fingerprint to the texture root it was computed for.
    ///
    /// Manifests store absolute paths, so a manifest built for one root must
    /// not validate for another even when config, count and mtime agree.
    #[must_use]
    pub fn with_root(&self, root: &Path) -> Self {
        Self::compute([self.as_str(), normalize_path(root).as_str()])
    }

    /// The hex string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FingerprintSource for [String] {
    fn fingerprint_values(&self) -> Vec<String> {
        self.to_vec()
    }
}
