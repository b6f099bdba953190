//! Profile-definition generation.
//!
//! The profile definition is the shell-sourced document the image-building
//! toolchain consumes: key/value identity fields rendered from the
//! template, followed by a `file_permissions` associative array listing
//! ownership and mode for every tracked executable. The shipped template
//! ends with the array opener and its fixed base entries; the generator
//! appends one line per tracked executable and closes the array.

use crate::config::DistroConfig;
use crate::executables::ExecutableEntry;
use crate::template;

/// Render the profile definition for `config` and the tracked executables.
///
/// The derived `id-upper` value is computed here, into a per-render copy
/// of the template values; the stored configuration never sees it.
/// Appended manifest lines follow first-registration order, so the output
/// is byte-identical for a given configuration and registry.
pub fn generate_profile(
    config: &DistroConfig,
    template_text: &str,
    executables: &[ExecutableEntry],
) -> String {
    let mut values = config.template_values();
    values.insert("id-upper".to_string(), config.id.to_uppercase());

    let mut out = template::render(template_text, &values);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    for entry in executables {
        out.push_str(&entry.manifest_line());
        out.push('\n');
    }
    out.push_str(")\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DistroConfig {
        serde_json::from_str(
            r#"{
                "name": "MyDistro",
                "id": "myos",
                "liveiso_hostname": "myos-live",
                "packages": []
            }"#,
        )
        .unwrap()
    }

    fn entry(path: &str) -> ExecutableEntry {
        ExecutableEntry {
            image_path: path.to_string(),
            owner: 0,
            group: 0,
            mode: 0o755,
        }
    }

    const TEMPLATE: &str = "iso_name=\"{id}\"\niso_label=\"{id-upper}_LIVE\"\nfile_permissions=(\n  [\"/etc/shadow\"]=\"0:0:400\"";

    #[test]
    fn renders_identity_and_appends_manifest() {
        let config = test_config();
        let entries = [entry("/root/.xinitrc"), entry("/root/installer")];

        let profile = generate_profile(&config, TEMPLATE, &entries);

        assert!(profile.contains("iso_name=\"myos\""));
        assert!(profile.contains("iso_label=\"MYOS_LIVE\""));
        assert!(profile.ends_with(
            "  [\"/etc/shadow\"]=\"0:0:400\"\n  [\"/root/.xinitrc\"]=\"0:0:755\"\n  [\"/root/installer\"]=\"0:0:755\"\n)\n"
        ));
    }

    #[test]
    fn manifest_lines_follow_registration_order() {
        let config = test_config();
        let entries = [entry("/root/b"), entry("/root/a")];

        let profile = generate_profile(&config, TEMPLATE, &entries);

        let b_at = profile.find("/root/b").unwrap();
        let a_at = profile.find("/root/a").unwrap();
        assert!(b_at < a_at);
    }

    #[test]
    fn output_is_deterministic() {
        let config = test_config();
        let entries = [entry("/root/installer")];

        let first = generate_profile(&config, TEMPLATE, &entries);
        let second = generate_profile(&config, TEMPLATE, &entries);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_registry_yields_closed_empty_tail() {
        let config = test_config();
        let profile = generate_profile(&config, TEMPLATE, &[]);
        assert!(profile.ends_with("  [\"/etc/shadow\"]=\"0:0:400\"\n)\n"));
    }

    #[test]
    fn derived_id_upper_stays_out_of_the_config() {
        let config = test_config();
        generate_profile(&config, TEMPLATE, &[]);
        assert!(!config.template_values().contains_key("id-upper"));
    }
}
