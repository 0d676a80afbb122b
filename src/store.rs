//! Artifact storage: existence checks, directory preparation, purging of
//! superseded artifacts, and atomic writes.
//!
//! Artifacts are never mutated in place. A write lands in a temp file in
//! the output directory and is renamed over the target, so a concurrent
//! builder of the same key can never observe a partially written file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BundleError;
use crate::fingerprint::Fingerprint;

/// True iff an artifact with exactly this key is present. Governs
/// whether a rebuild is skipped.
pub fn exists(dir: &Path, key: &str) -> bool {
    dir.join(key).is_file()
}

/// Create the output directory (recursively) if absent and verify it is
/// writable. Must be called before any write.
pub fn ensure_writable_dir(dir: &Path) -> Result<(), BundleError> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|err| BundleError::directory_unavailable(dir, err.to_string()))?;
    }

    if !dir.is_dir() {
        return Err(BundleError::directory_unavailable(
            dir,
            "not a directory".to_string(),
        ));
    }

    // Probe writability with a throwaway file; permission bits alone are
    // not reliable across platforms.
    let probe = dir.join(".write-probe");
    match fs::write(&probe, b"") {
        Ok(()) => {
            fs::remove_file(&probe).ok();
            Ok(())
        }
        Err(err) => Err(BundleError::directory_unavailable(dir, err.to_string())),
    }
}

/// Delete every artifact whose name begins with the fingerprint hex.
///
/// This covers stale freshness-suffixed variants of the same source set.
/// Deletion continues past individual failures; everything that survived
/// is reported in a single [`BundleError::ArtifactCleanup`].
pub fn purge_superseded(dir: &Path, fingerprint: &Fingerprint) -> Result<(), BundleError> {
    let prefix = fingerprint.to_hex();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => return Err(BundleError::directory_unavailable(dir, err.to_string())),
    };

    let mut failed: Vec<PathBuf> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(&prefix) && fs::remove_file(entry.path()).is_err() {
            failed.push(entry.path());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(BundleError::ArtifactCleanup { failed })
    }
}

/// Persist an artifact under its key and return the key.
///
/// Write-then-rename: the content first lands in a process-unique temp
/// file in the same directory, then replaces the target atomically.
pub fn write(dir: &Path, key: &str, content: &str) -> Result<String, BundleError> {
    let target = dir.join(key);
    let staging = dir.join(format!("{key}.{}.tmp", std::process::id()));

    fs::write(&staging, content).map_err(|err| BundleError::ArtifactWrite {
        path: staging.clone(),
        source: err,
    })?;

    if let Err(err) = fs::rename(&staging, &target) {
        fs::remove_file(&staging).ok();
        return Err(BundleError::ArtifactWrite {
            path: target,
            source: err,
        });
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::fingerprint;
    use tempfile::TempDir;

    #[test]
    fn test_exists() {
        let dir = TempDir::new().unwrap();
        assert!(!exists(dir.path(), "abc.js"));
        fs::write(dir.path().join("abc.js"), "x").unwrap();
        assert!(exists(dir.path(), "abc.js"));
    }

    #[test]
    fn test_ensure_writable_dir_creates_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("min/js");
        ensure_writable_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_writable_dir_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, "x").unwrap();
        let err = ensure_writable_dir(&file).unwrap_err();
        assert!(matches!(err, BundleError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_write_is_atomic_and_leaves_no_residue() {
        let dir = TempDir::new().unwrap();
        let key = write(dir.path(), "deadbeef123.js", "var a;").unwrap();
        assert_eq!(key, "deadbeef123.js");
        assert_eq!(
            fs::read_to_string(dir.path().join("deadbeef123.js")).unwrap(),
            "var a;"
        );

        // No temp files left behind
        let residue: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(residue.is_empty());
    }

    #[test]
    fn test_purge_superseded_by_prefix() {
        let dir = TempDir::new().unwrap();
        let fp = fingerprint(&["a.js"], "");
        let prefix = fp.to_hex();

        fs::write(dir.path().join(format!("{prefix}111.js")), "old").unwrap();
        fs::write(dir.path().join(format!("{prefix}222.js")), "older").unwrap();
        fs::write(dir.path().join("unrelated.js"), "keep").unwrap();

        purge_superseded(dir.path(), &fp).unwrap();

        let remaining: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(remaining, vec!["unrelated.js".to_string()]);
    }

    #[test]
    fn test_purge_empty_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        let fp = fingerprint(&["a.js"], "");
        purge_superseded(dir.path(), &fp).unwrap();
    }
}
