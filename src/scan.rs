//! Directory scanning for whole-folder bundle cycles.

use std::path::Path;

use jwalk::WalkDir;

/// Collect public-root-relative paths of bundleable files under `dir`.
///
/// A file qualifies when its extension matches `ext` and its file name
/// is shorter than 30 characters (already-fingerprinted artifacts never
/// qualify). Results sort ascending, or descending when `reverse` is
/// set, so the concatenation order is stable across runs.
pub fn scan_asset_dir(public_root: &Path, dir: &str, ext: &str, reverse: bool) -> Vec<String> {
    let base = public_root.join(dir.trim_start_matches('/'));

    let mut files: Vec<String> = WalkDir::new(&base)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| {
            let name_ok = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.len() < 30);
            let ext_ok = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == ext);
            name_ok && ext_ok
        })
        .filter_map(|path| {
            path.strip_prefix(public_root)
                .ok()
                .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    if reverse {
        files.sort_by(|a, b| b.cmp(a));
    } else {
        files.sort();
    }
    files
}
