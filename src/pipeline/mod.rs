//! The profile build pipeline.
//!
//! A build is a fixed, strictly sequential run of stages over one working
//! tree. There is no conditional branching between stages and no retry;
//! the first failure halts the build at its current stage and leaves the
//! tree in place for inspection. Later stages assume the filesystem
//! structure created by earlier ones, so the order is load-bearing: the
//! manifest stage in particular requires every executable-marking stage
//! to have already run.

pub mod paths;

use anyhow::{bail, Context, Result};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DistroConfig;
use crate::executables::ExecutableRegistry;
use crate::overlay;
use crate::packages;
use crate::profiledef;
use crate::rebrand::{self, RebrandOutcome, RebrandReport};
use crate::template;
use paths::ProfilePaths;

/// Upstream name replaced throughout the boot-loader text.
const UPSTREAM_NAME: &str = "Arch Linux";

/// Home-overlay files that must carry the executable bit.
const HOME_ENTRY_POINTS: &[&str] = &[".xinitrc", ".zshrc"];

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    Init,
    ReleaseFilesCopied,
    PackagesInjected,
    Rebranded,
    HostnameSet,
    HomeOverlaid,
    ProfileEmitted,
    Done,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Init => "init",
            BuildStage::ReleaseFilesCopied => "release-files-copied",
            BuildStage::PackagesInjected => "packages-injected",
            BuildStage::Rebranded => "rebranded",
            BuildStage::HostnameSet => "hostname-set",
            BuildStage::HomeOverlaid => "home-overlaid",
            BuildStage::ProfileEmitted => "profile-emitted",
            BuildStage::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// Orchestrates one build against one configuration and one working tree.
///
/// Owns the executable registry for the lifetime of the build and hands it
/// to the stages that append to it; the manifest stage reads it at the
/// end.
pub struct ProfileBuilder {
    config: DistroConfig,
    res_dir: PathBuf,
    distro_dir: PathBuf,
    base_profile: PathBuf,
    paths: ProfilePaths,
    registry: ExecutableRegistry,
    stage: BuildStage,
}

impl ProfileBuilder {
    pub fn new(
        config: DistroConfig,
        res_dir: PathBuf,
        distro_dir: PathBuf,
        base_profile: PathBuf,
        output_root: PathBuf,
    ) -> Self {
        let paths = ProfilePaths::new(output_root);
        let registry = ExecutableRegistry::new(paths.airootfs());
        Self {
            config,
            res_dir,
            distro_dir,
            base_profile,
            paths,
            registry,
            stage: BuildStage::Init,
        }
    }

    /// Stage the build last entered.
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    pub fn paths(&self) -> &ProfilePaths {
        &self.paths
    }

    /// Run every stage in order. Stops at the first failure, with the
    /// failing stage named in the error chain.
    pub fn run(&mut self) -> Result<()> {
        self.step(BuildStage::ReleaseFilesCopied, Self::copy_release_files)?;
        self.step(BuildStage::PackagesInjected, Self::inject_packages)?;
        self.step(BuildStage::Rebranded, Self::rebrand_bootloader)?;
        self.step(BuildStage::HostnameSet, Self::set_hostname)?;
        self.step(BuildStage::HomeOverlaid, Self::overlay_home)?;
        self.step(BuildStage::ProfileEmitted, Self::emit_profile)?;

        self.stage = BuildStage::Done;
        println!(
            "[build:{}] profile ready at '{}'; boots into an i3 X11 environment that runs the installer",
            self.stage,
            self.paths.root().display()
        );
        Ok(())
    }

    fn step<F>(&mut self, stage: BuildStage, work: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.stage = stage;
        println!("[build:{stage}]");
        work(self).with_context(|| format!("stage '{stage}' failed"))
    }

    /// Seed the working tree from the base profile via the external
    /// file-seeding step. The copy is opaque to the builder; only its
    /// exit status is inspected.
    fn copy_release_files(&mut self) -> Result<()> {
        let status = Command::new("cp")
            .arg("-r")
            .arg(&self.base_profile)
            .arg(self.paths.root())
            .status()
            .with_context(|| {
                format!(
                    "running cp for base profile '{}'",
                    self.base_profile.display()
                )
            })?;
        if !status.success() {
            bail!(
                "base profile copy '{}' -> '{}' exited with status {status}",
                self.base_profile.display(),
                self.paths.root().display()
            );
        }
        Ok(())
    }

    /// Append the composed package list to the profile's package file,
    /// one name per line. Appending (not truncating) preserves the base
    /// profile's own list; the file format is a hard toolchain boundary.
    fn inject_packages(&mut self) -> Result<()> {
        let list = packages::package_list(&self.config.packages);
        for name in &list {
            println!(" * {name}");
        }

        let path = self.paths.packages_file();
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("opening package list '{}'", path.display()))?;
        file.write_all(list.join("\n").as_bytes())
            .with_context(|| format!("appending packages to '{}'", path.display()))?;
        Ok(())
    }

    /// Rebrand the syslinux menus, then the EFI boot entries. Both
    /// directories use the identical algorithm; per-file skips are logged
    /// and tolerated.
    fn rebrand_bootloader(&mut self) -> Result<()> {
        for dir in [self.paths.syslinux_dir(), self.paths.efi_entries_dir()] {
            let report = rebrand::rebrand_dir(&dir, UPSTREAM_NAME, &self.config.name)
                .with_context(|| format!("rebranding '{}'", dir.display()))?;
            log_rebrand(&report);
        }
        Ok(())
    }

    fn set_hostname(&mut self) -> Result<()> {
        let path = self.paths.hostname_file();
        write_with_parents(&path, self.config.liveiso_hostname.as_bytes())
    }

    /// Populate the live root filesystem: autologin drop-in, the home
    /// overlay, the installer entry point, the boot splash, and the
    /// rendered os-release identity. Entry points are marked executable
    /// here, after the files exist on disk.
    fn overlay_home(&mut self) -> Result<()> {
        let autologin_src = self.res_dir.join("autologin.conf");
        let autologin = fs::read_to_string(&autologin_src)
            .with_context(|| format!("reading '{}'", autologin_src.display()))?;
        write_with_parents(&self.paths.autologin_file(), autologin.as_bytes())?;

        let home_src = self.res_dir.join("home");
        let home_dst = self.paths.root_home();
        overlay::apply(&home_src, &home_dst).with_context(|| {
            format!(
                "applying home overlay '{}' onto '{}'",
                home_src.display(),
                home_dst.display()
            )
        })?;
        for entry_point in HOME_ENTRY_POINTS {
            self.registry.mark_executable(&home_dst.join(entry_point))?;
        }

        let installer_src = self.distro_dir.join("installer");
        let installer_dst = self.paths.installer_file();
        fs::copy(&installer_src, &installer_dst).with_context(|| {
            format!(
                "copying installer '{}' to '{}'",
                installer_src.display(),
                installer_dst.display()
            )
        })?;
        self.registry.mark_executable(&installer_dst)?;

        let splash_src = self.distro_dir.join("splash.png");
        let splash_dst = self.paths.splash_file();
        fs::copy(&splash_src, &splash_dst).with_context(|| {
            format!(
                "copying splash '{}' to '{}'",
                splash_src.display(),
                splash_dst.display()
            )
        })?;

        let template_src = self.res_dir.join("os-release");
        let template_text = fs::read_to_string(&template_src)
            .with_context(|| format!("reading '{}'", template_src.display()))?;
        let rendered = template::render(&template_text, &self.config.template_values());
        write_with_parents(&self.paths.os_release_file(), rendered.as_bytes())
    }

    /// Generate the profile definition from the rendered template and the
    /// executable registry, and write it where the toolchain expects it.
    fn emit_profile(&mut self) -> Result<()> {
        let template_src = self.res_dir.join("profiledef.sh");
        let template_text = fs::read_to_string(&template_src)
            .with_context(|| format!("reading '{}'", template_src.display()))?;
        let profile =
            profiledef::generate_profile(&self.config, &template_text, self.registry.entries());
        write_with_parents(&self.paths.profiledef_file(), profile.as_bytes())
    }
}

fn write_with_parents(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating '{}'", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("writing '{}'", path.display()))
}

fn log_rebrand(report: &RebrandReport) {
    for (name, outcome) in &report.results {
        match outcome {
            RebrandOutcome::Rewritten { replacements } => {
                println!(" * rebranded {name} ({replacements} occurrences)");
            }
            RebrandOutcome::Skipped { reason } => {
                println!(" - skipped {name}: {reason}");
            }
        }
    }
}
