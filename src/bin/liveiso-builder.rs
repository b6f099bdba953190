use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use liveiso_builder::pipeline::paths::DEFAULT_BASE_PROFILE;
use liveiso_builder::{load_config, preflight, ProfileBuilder};

fn usage() -> &'static str {
    "Usage:\n  liveiso-builder build [<distro_dir>]\n\n\
     The distro directory (default './distro') must contain config.json,\n\
     an installer script, and splash.png. The assembled profile is written\n\
     to './archiso'.\n\n\
     Environment:\n  LIVEISO_BASE_PROFILE  archiso base profile to seed from\n\
     \x20                       (default /usr/share/archiso/configs/releng)"
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [cmd] if cmd == "build" => build(Path::new("distro")),
        [cmd, distro_dir] if cmd == "build" => build(Path::new(distro_dir)),
        _ => bail!(usage()),
    }
}

fn build(distro_dir: &Path) -> Result<()> {
    let base_profile = std::env::var_os("LIVEISO_BASE_PROFILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_PROFILE));

    preflight::check_required_tools(preflight::REQUIRED_TOOLS)?;
    preflight::check_base_profile(&base_profile)?;

    let config = load_config(&distro_dir.join("config.json"))?;
    println!("[config] {} ({}), {} extra packages", config.name, config.id, config.packages.len());

    let mut builder = ProfileBuilder::new(
        config,
        PathBuf::from("res"),
        distro_dir.to_path_buf(),
        base_profile,
        PathBuf::from("archiso"),
    );
    builder.run()
}
