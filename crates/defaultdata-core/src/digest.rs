//! # File Digests
//!
//! Size and content hash of a tidy file. The hash is computed by streaming
//! the file through SHA-256 in fixed 8 KiB chunks, so memory use does not
//! grow with file size.
//!
//! Packaged resources carry the hash in the `<algorithm>:<hex>` form
//! (`sha256:…`), which is how tabular data resources tag any hash that is
//! not MD5.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{DataError, DataResult};

/// Chunk size for streaming reads.
pub const DIGEST_CHUNK_SIZE: usize = 8192;

/// The hash algorithm used for file digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte length and content hash of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// File size in bytes, from filesystem metadata.
    pub bytes: u64,
    /// Algorithm that produced `hex`.
    pub algorithm: DigestAlgorithm,
    /// Lowercase hex digest.
    pub hex: String,
}

impl FileDigest {
    /// The hash as written to a resource descriptor: `sha256:<hex>`.
    pub fn hash_field(&self) -> String {
        format!("{}:{}", self.algorithm, self.hex)
    }
}

/// Compute the size and SHA-256 digest of the file at `path`.
///
/// Any I/O failure is returned as [`DataError::FileRead`].
pub fn file_digest(path: &Path) -> DataResult<FileDigest> {
    let bytes = std::fs::metadata(path)
        .map_err(|e| DataError::read(path, e))?
        .len();

    let mut file = File::open(path).map_err(|e| DataError::read(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; DIGEST_CHUNK_SIZE];
    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(DataError::read(path, e)),
        };
        hasher.update(&buffer[..n]);
    }

    let hex: String = hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();

    tracing::debug!(path = %path.display(), bytes, "computed file digest");

    Ok(FileDigest {
        bytes,
        algorithm: DigestAlgorithm::Sha256,
        hex,
    })
}
