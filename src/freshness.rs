//! Staleness detection: an additive freshness token over all sources.
//!
//! Local sources contribute their modification time; remote sources have
//! no reliable mtime, so a deterministic surrogate is derived from the
//! URL and the forwarded User-Agent. The token is the wrapping sum of
//! all per-source values.
//!
//! The sum is a coarse invalidation signal: two different sets of
//! timestamps that sum to the same total are indistinguishable. That is
//! a documented weakness of the scheme, kept as-is, since callers may depend
//! on its exact cache-busting timing.

use std::fs;
use std::time::UNIX_EPOCH;

use crate::error::BundleError;
use crate::source::SourceReference;

/// Compute the freshness token for an ordered source set.
///
/// Fails with [`BundleError::SourceMissing`] if a local file disappeared
/// between add time and build time.
pub fn freshness(
    sources: &[SourceReference],
    user_agent: &str,
) -> Result<u64, BundleError> {
    let mut total: u64 = 0;

    for source in sources {
        let value = match source {
            SourceReference::Local { path, .. } => {
                let modified = fs::metadata(path)
                    .and_then(|meta| meta.modified())
                    .map_err(|_| BundleError::SourceMissing { path: path.clone() })?;
                modified
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            }
            SourceReference::Remote { url } => u64::from(remote_surrogate(url, user_agent)),
        };
        total = total.wrapping_add(value);
    }

    Ok(total)
}

/// Deterministic 32-bit stand-in for a remote resource's mtime, derived
/// from hashing the URL together with the forwarded User-Agent.
fn remote_surrogate(url: &str, user_agent: &str) -> u32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(url.as_bytes());
    hasher.update(user_agent.as_bytes());
    let digest = hasher.finalize();
    let bytes = digest.as_bytes();
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
