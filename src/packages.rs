//! Package selection for the live image.

/// Desktop environment and display stack installed into every live image.
///
/// The configured extras are appended after these, so a distro can rely on
/// the X11/i3 environment being present without declaring it.
pub const BASE_PACKAGES: [&str; 12] = [
    "xorg-server",
    "xorg-xinit",
    "xorg-xrandr",
    "xorg-xsetroot",
    "xorg-xbacklight",
    "xorg-xinput",
    "xterm",
    "i3",
    "i3status",
    "dmenu",
    "lightdm",
    "lightdm-gtk-greeter",
];

/// Base list followed by the configured extras.
///
/// Order is preserved exactly and duplicates are not removed; the package
/// list file is a verbatim record of what was requested.
pub fn package_list(extra: &[String]) -> Vec<String> {
    BASE_PACKAGES
        .iter()
        .map(|name| name.to_string())
        .chain(extra.iter().cloned())
        .collect()
}
