//! Copying a directory tree into a working location.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Copy everything under `from` into `to`, creating `to` as needed.
/// Existing files in `to` are overwritten. Returns the number of files copied.
pub fn copy_directory_structure(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to)?;

    let mut copied = 0;
    for entry in WalkDir::new(from).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!("Copied {} file(s) from {} to {}", copied, from.display(), to.display());
    Ok(copied)
}
