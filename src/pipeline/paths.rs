//! Working-tree path layout.
//!
//! Every fixed path inside the assembled profile lives here so stages
//! never hard-code strings. The layout mirrors an archiso profile:
//! `airootfs/` is the future live root filesystem, `syslinux/` and
//! `efiboot/` carry the boot-loader configuration.

use std::path::{Path, PathBuf};

/// Default location of the archiso releng profile used to seed the tree.
pub const DEFAULT_BASE_PROFILE: &str = "/usr/share/archiso/configs/releng";

/// Path layout of one working tree.
#[derive(Debug, Clone)]
pub struct ProfilePaths {
    root: PathBuf,
}

impl ProfilePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root of the working tree (the profile directory itself).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root filesystem of the live image.
    pub fn airootfs(&self) -> PathBuf {
        self.root.join("airootfs")
    }

    /// Package list consumed by the image-building toolchain.
    pub fn packages_file(&self) -> PathBuf {
        self.root.join("packages.x86_64")
    }

    /// BIOS boot-loader configuration directory.
    pub fn syslinux_dir(&self) -> PathBuf {
        self.root.join("syslinux")
    }

    /// EFI boot-entry directory.
    pub fn efi_entries_dir(&self) -> PathBuf {
        self.root.join("efiboot/loader/entries")
    }

    /// Boot splash image inside the syslinux directory.
    pub fn splash_file(&self) -> PathBuf {
        self.syslinux_dir().join("splash.png")
    }

    pub fn hostname_file(&self) -> PathBuf {
        self.airootfs().join("etc/hostname")
    }

    pub fn os_release_file(&self) -> PathBuf {
        self.airootfs().join("etc/os-release")
    }

    /// Getty drop-in enabling root autologin on tty1.
    pub fn autologin_file(&self) -> PathBuf {
        self.airootfs()
            .join("etc/systemd/system/getty@tty1.service.d/autologin.conf")
    }

    /// Home directory of the live session's root user.
    pub fn root_home(&self) -> PathBuf {
        self.airootfs().join("root")
    }

    pub fn installer_file(&self) -> PathBuf {
        self.root_home().join("installer")
    }

    /// Profile definition handed to the image-building toolchain.
    pub fn profiledef_file(&self) -> PathBuf {
        self.root_home().join(".profiledef")
    }
}
