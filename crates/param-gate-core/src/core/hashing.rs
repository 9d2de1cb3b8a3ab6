// crates/param-gate-core/src/core/hashing.rs
// ============================================================================
// Module: Param Gate Schema Fingerprints
// Description: Content digests of schemas and query documents.
// Purpose: Key compiled-schema caches and audit records by schema content.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! A fingerprint is a SHA-256 digest of a document's RFC 8785 (JCS) canonical
//! JSON. Two schemas that differ only in key order or whitespace therefore
//! share one fingerprint, whichever authoring format they came from.
//!
//! Fingerprints render as `algorithm:hex` (for example `sha256:44136f...`),
//! the form used in CLI output and audit records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::core::schema::ParameterNode;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Digest algorithms available for fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 over canonical JSON.
    Sha256,
}

impl HashAlgorithm {
    /// Returns the wire label used as the rendered digest prefix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

/// Algorithm used by [`schema_fingerprint`].
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Fingerprint of a canonical JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm that produced the digest.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex digest.
    pub value: String,
}

impl fmt::Display for HashDigest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.algorithm.label(), self.value)
    }
}

/// Errors raised while fingerprinting.
#[derive(Debug, Error)]
pub enum HashError {
    /// The document has no canonical JSON form.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Fingerprinting
// ============================================================================

/// Fingerprints a schema tree with [`DEFAULT_HASH_ALGORITHM`].
///
/// The tree is hashed as authored, so defects do not prevent fingerprinting
/// and rejected schemas can still be identified in audit records.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when the schema holds values JCS
/// cannot represent (e.g. non-finite numbers).
pub fn schema_fingerprint(root: &ParameterNode) -> Result<HashDigest, HashError> {
    hash_canonical_json(DEFAULT_HASH_ALGORITHM, root)
}

/// Fingerprints any serializable document, such as a raw query expression.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    document: &T,
) -> Result<HashDigest, HashError> {
    let canonical =
        serde_jcs::to_vec(document).map_err(|err| HashError::Canonicalization(err.to_string()))?;
    let bytes = match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(&canonical),
    };
    let mut value = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        let _ = write!(value, "{byte:02x}");
    }
    Ok(HashDigest {
        algorithm,
        value,
    })
}
