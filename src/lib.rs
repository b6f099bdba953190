//! Assembles a rebranded archiso live ISO profile.
//!
//! The builder takes three inputs - the host's archiso base profile, a
//! distro configuration (`config.json`), and a set of overlay resources -
//! and produces a working tree the image-building toolchain can turn into
//! a bootable live ISO:
//!
//! - **Template engine** - `{key}` substitution for os-release and the
//!   profile definition
//! - **Executable registry** - chmods entry points and records them for
//!   the profile manifest
//! - **Overlay applier** - merges the home resource tree into the live
//!   root filesystem
//! - **Rebrander** - rewrites the upstream name in boot-loader text,
//!   tolerating per-file failures
//! - **Pipeline** - runs the stages in a fixed order against one working
//!   tree
//!
//! # Data flow
//!
//! ```text
//! config.json ──┬─> template engine ──> os-release, profile definition
//!               ├─> rebrander ────────> syslinux/, efiboot/
//!               └─> package list ─────> packages.x86_64
//! overlays ───────> executable registry ──> profile manifest
//! ```
//!
//! Flow is strictly forward: no component reads back output written by a
//! later stage.

pub mod config;
pub mod error;
pub mod executables;
pub mod overlay;
pub mod packages;
pub mod pipeline;
pub mod preflight;
pub mod profiledef;
pub mod rebrand;
pub mod template;

pub use config::{load_config, DistroConfig};
pub use error::BuildError;
pub use executables::{ExecutableEntry, ExecutableRegistry};
pub use pipeline::{BuildStage, ProfileBuilder};
pub use rebrand::{RebrandOutcome, RebrandReport};
