// Directory scanner: depth-first walk collecting every regular file.

use anyhow::{bail, Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively list all regular files under `root`, in directory-listing
/// order. Symlinks are not followed and are skipped, so link cycles cannot
/// recurse. Any unreadable directory aborts the scan.
pub fn scan_directory(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root)
        .with_context(|| format!("cannot access directory {}", root.display()))?;
    if !meta.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        let file_type = entry.file_type();
        if file_type.is_file() {
            files.push(entry.into_path());
        } else if file_type.is_symlink() {
            debug!("skipping symlink {}", entry.path().display());
        }
    }
    Ok(files)
}
