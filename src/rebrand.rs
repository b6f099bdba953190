//! Boot-loader text rebranding.
//!
//! The seeded profile ships syslinux menus and EFI boot entries that name
//! the upstream distribution. Rebranding rewrites that literal token in
//! every text file of a boot directory. Failures here are cosmetic, not
//! fatal to image correctness, so a file that cannot be rewritten is
//! recorded as skipped and the pass continues.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// The boot splash image, never treated as text.
pub const BINARY_ASSET: &str = "splash.png";

/// What happened to one file during a rebrand pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebrandOutcome {
    /// The file was scanned; `replacements` occurrences were rewritten.
    Rewritten { replacements: usize },
    /// The file could not be read back or written; left untouched.
    Skipped { reason: String },
}

/// Per-file results of one rebrand pass, in directory walk order.
#[derive(Debug, Default)]
pub struct RebrandReport {
    pub results: Vec<(String, RebrandOutcome)>,
}

impl RebrandReport {
    /// Names of files that were skipped, for logging and assertions.
    pub fn skipped(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|(name, outcome)| match outcome {
                RebrandOutcome::Skipped { .. } => Some(name.as_str()),
                RebrandOutcome::Rewritten { .. } => None,
            })
            .collect()
    }

    /// Total occurrences rewritten across the pass.
    pub fn replacements(&self) -> usize {
        self.results
            .iter()
            .map(|(_, outcome)| match outcome {
                RebrandOutcome::Rewritten { replacements } => *replacements,
                RebrandOutcome::Skipped { .. } => 0,
            })
            .sum()
    }
}

/// Replace `old_token` with `new_value` in every text file under `dir`.
///
/// The designated binary asset ([`BINARY_ASSET`]) is excluded from the
/// scan. Per-file failures become [`RebrandOutcome::Skipped`] entries;
/// only failing to list the directory itself is fatal.
pub fn rebrand_dir(dir: &Path, old_token: &str, new_value: &str) -> Result<RebrandReport> {
    let mut report = RebrandReport::default();

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("listing rebrand directory '{}'", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name == BINARY_ASSET {
            continue;
        }
        let outcome = rebrand_file(entry.path(), old_token, new_value);
        report.results.push((name, outcome));
    }

    Ok(report)
}

fn rebrand_file(path: &Path, old_token: &str, new_value: &str) -> RebrandOutcome {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            return RebrandOutcome::Skipped {
                reason: format!("not readable as text: {err}"),
            }
        }
    };

    let replacements = text.matches(old_token).count();
    if replacements > 0 {
        if let Err(err) = fs::write(path, text.replace(old_token, new_value)) {
            return RebrandOutcome::Skipped {
                reason: format!("write failed: {err}"),
            };
        }
    }
    RebrandOutcome::Rewritten { replacements }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rewrites_text_and_leaves_binary_asset_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("syslinux.cfg"), "Arch Linux boot").unwrap();
        // PNG header bytes, deliberately not valid UTF-8 text
        fs::write(temp.path().join("splash.png"), [0x89, 0x50, 0x4E, 0x47, 0xFF]).unwrap();

        let report = rebrand_dir(temp.path(), "Arch Linux", "MyDistro").unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("syslinux.cfg")).unwrap(),
            "MyDistro boot"
        );
        assert_eq!(
            fs::read(temp.path().join("splash.png")).unwrap(),
            [0x89, 0x50, 0x4E, 0x47, 0xFF]
        );
        // the asset never appears in the report
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.replacements(), 1);
    }

    #[test]
    fn unreadable_file_is_skipped_not_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("entry.conf"), "title Arch Linux").unwrap();
        fs::write(temp.path().join("garbage.bin"), [0xFF, 0xFE, 0x00, 0x80]).unwrap();

        let report = rebrand_dir(temp.path(), "Arch Linux", "MyDistro").unwrap();

        assert_eq!(report.skipped(), ["garbage.bin"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("entry.conf")).unwrap(),
            "title MyDistro"
        );
    }

    #[test]
    fn files_without_the_token_are_left_as_is() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("plain.cfg"), "TIMEOUT 30").unwrap();

        let report = rebrand_dir(temp.path(), "Arch Linux", "MyDistro").unwrap();

        assert_eq!(report.replacements(), 0);
        assert!(report.skipped().is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join("plain.cfg")).unwrap(),
            "TIMEOUT 30"
        );
    }

    #[test]
    fn missing_directory_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = rebrand_dir(&temp.path().join("absent"), "Arch Linux", "MyDistro");
        assert!(result.is_err());
    }
}
