//! Executable permission tracking.
//!
//! Several stages produce files that must boot with the executable bit set
//! (shell startup scripts, the installer entry point). The registry chmods
//! them on the real filesystem and records each one so the profile
//! definition can declare the matching ownership and mode for the image
//! builder, which does not preserve permissions on its own.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// One tracked executable, addressed by its path inside the image root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableEntry {
    /// Absolute path within the image root (airootfs prefix stripped).
    pub image_path: String,
    pub owner: u32,
    pub group: u32,
    pub mode: u32,
}

impl ExecutableEntry {
    /// Render the profile-definition manifest line for this entry.
    pub fn manifest_line(&self) -> String {
        format!(
            "  [\"{}\"]=\"{}:{}:{:o}\"",
            self.image_path, self.owner, self.group, self.mode
        )
    }
}

/// Append-only registry of executables, owned by the orchestrator.
///
/// Stages append through [`mark_executable`](Self::mark_executable); the
/// manifest generator reads [`entries`](Self::entries) at the end of the
/// build. The registry lives for the whole build and is never cleared.
#[derive(Debug)]
pub struct ExecutableRegistry {
    image_root: PathBuf,
    entries: Vec<ExecutableEntry>,
}

impl ExecutableRegistry {
    /// Create an empty registry rooted at the image filesystem root.
    pub fn new(image_root: impl Into<PathBuf>) -> Self {
        Self {
            image_root: image_root.into(),
            entries: Vec::new(),
        }
    }

    /// Set the executable bit on `path` and record it for the manifest.
    ///
    /// The file is chmodded to `0o755`. A path that is already registered
    /// is chmodded again but not recorded twice; the manifest carries one
    /// line per unique path, in first-registration order. A missing file
    /// is fatal: an absent entry point means a broken overlay.
    pub fn mark_executable(&mut self, path: &Path) -> Result<(), BuildError> {
        if !path.is_file() {
            return Err(BuildError::MissingEntryPoint {
                path: path.to_path_buf(),
            });
        }

        let mut perms = fs::metadata(path)
            .map_err(|source| BuildError::filesystem(path, source))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)
            .map_err(|source| BuildError::filesystem(path, source))?;

        let image_path = self.image_path_for(path);
        if self.entries.iter().all(|entry| entry.image_path != image_path) {
            self.entries.push(ExecutableEntry {
                image_path,
                owner: 0,
                group: 0,
                mode: 0o755,
            });
        }
        println!(" * made executable {}", path.display());
        Ok(())
    }

    /// Tracked entries in first-registration order.
    pub fn entries(&self) -> &[ExecutableEntry] {
        &self.entries
    }

    fn image_path_for(&self, path: &Path) -> String {
        match path.strip_prefix(&self.image_root) {
            Ok(rel) => format!("/{}", rel.display()),
            Err(_) => path.display().to_string(),
        }
    }
}
