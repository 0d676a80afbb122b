//! Cache-key fingerprints derived from ordered source identifiers.
//!
//! The fingerprint hashes the identifier *strings* (paths and URLs), not
//! file contents: two source sets with identical ordered identifiers and
//! salt always produce identical fingerprints, and any reordering,
//! addition, removal or salt change produces a different one.

use std::fmt;

/// A 128-bit fingerprint (truncated blake3 output), hex-encoded on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    #[inline]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Hex form, 32 lowercase characters. This is the artifact filename
    /// prefix used for existence checks and superseded-artifact purges.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute the fingerprint of an ordered identifier list plus a salt.
///
/// Pure function, no I/O. Identifiers are joined with `-` and the salt
/// appended before hashing, so a salt change invalidates every key.
pub fn fingerprint<S: AsRef<str>>(ids: &[S], salt: &str) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    for (index, id) in ids.iter().enumerate() {
        if index > 0 {
            hasher.update(b"-");
        }
        hasher.update(id.as_ref().as_bytes());
    }
    hasher.update(salt.as_bytes());

    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest.as_bytes()[..16]);
    Fingerprint::new(bytes)
}
