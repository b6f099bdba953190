//! Preflight checks for build validation.
//!
//! Validates the host before any working-tree mutation. This prevents
//! cryptic mid-build errors when a tool or the base profile is missing.

use anyhow::{bail, Result};
use std::path::Path;

/// Host tools the build shells out to, as (command, providing package).
pub const REQUIRED_TOOLS: &[(&str, &str)] = &[("cp", "coreutils")];

/// Check if a command resolves on the host PATH.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Check that specific tools are available.
///
/// Returns an error listing every missing tool and the package that
/// provides it.
pub fn check_required_tools(tools: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<_> = tools
        .iter()
        .filter(|(tool, _)| !command_exists(tool))
        .collect();

    if !missing.is_empty() {
        let msg = missing
            .iter()
            .map(|(t, p)| format!("  {} (install: {})", t, p))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Missing required host tools:\n{}", msg);
    }

    Ok(())
}

/// Check that the base profile template the working tree is seeded from
/// exists on the host.
pub fn check_base_profile(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!(
            "base profile template not found at '{}' (install archiso or set LIVEISO_BASE_PROFILE)",
            dir.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("ls"));
        assert!(!command_exists("definitely_not_a_real_command_12345"));
    }

    #[test]
    fn test_check_required_tools_failure_lists_package() {
        let tools = &[("nonexistent_command_xyz", "fake-package")];
        let err = check_required_tools(tools).unwrap_err();
        assert!(err.to_string().contains("fake-package"));
    }

    #[test]
    fn test_check_base_profile() {
        let temp = TempDir::new().unwrap();
        assert!(check_base_profile(temp.path()).is_ok());
        assert!(check_base_profile(&temp.path().join("absent")).is_err());
    }
}
