//! Overlay application onto the working tree.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Recursively merge `source` into `dest`.
///
/// Creates destination directories as needed, preserves symlinks instead
/// of following them, and overwrites files that already exist. Nothing is
/// diffed and nothing is rolled back; a failed copy leaves the partial
/// result in place for inspection.
///
/// The applier never decides which copied files are executable. That
/// knowledge belongs to the orchestrator, which knows the overlay's
/// semantic contents and marks entry points after the copy.
pub fn apply(source: &Path, dest: &Path) -> Result<()> {
    if !dest.exists() {
        fs::create_dir_all(dest)
            .with_context(|| format!("creating overlay destination '{}'", dest.display()))?;
    }

    for entry in fs::read_dir(source)
        .with_context(|| format!("reading overlay source '{}'", source.display()))?
    {
        let entry = entry
            .with_context(|| format!("reading directory entry in '{}'", source.display()))?;
        let src_path = entry.path();
        let dst_path = dest.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading file type of '{}'", src_path.display()))?;

        if file_type.is_symlink() {
            let target = fs::read_link(&src_path)
                .with_context(|| format!("reading symlink '{}'", src_path.display()))?;
            if dst_path.symlink_metadata().is_ok() {
                fs::remove_file(&dst_path)
                    .with_context(|| format!("removing '{}'", dst_path.display()))?;
            }
            std::os::unix::fs::symlink(&target, &dst_path)
                .with_context(|| format!("creating symlink '{}'", dst_path.display()))?;
        } else if file_type.is_dir() {
            apply(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "copying '{}' to '{}'",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}
