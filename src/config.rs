//! Distro configuration loading.
//!
//! The configuration is a JSON document loaded once at startup. Beyond the
//! required fields it is an open map: any extra key becomes available to
//! template rendering, so a distro can introduce its own placeholders
//! without touching the builder.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::BuildError;

/// User-supplied distribution configuration, immutable for the whole build.
#[derive(Debug, Clone, Deserialize)]
pub struct DistroConfig {
    /// Display name of the distribution (replaces "Arch Linux" in boot text).
    pub name: String,
    /// Short identifier used in os-release and the ISO label.
    pub id: String,
    /// Hostname of the booted live session.
    pub liveiso_hostname: String,
    /// Extra packages appended after the base desktop list.
    pub packages: Vec<String>,
    /// Any further keys, kept for template rendering.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DistroConfig {
    /// Key→string map handed to the template engine.
    ///
    /// Strings are passed through verbatim, everything else in its JSON
    /// form. The derived `id-upper` key is never stored here; renders that
    /// need it insert it into their own copy so unrelated renders cannot
    /// observe it.
    pub fn template_values(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        values.insert("name".to_string(), self.name.clone());
        values.insert("id".to_string(), self.id.clone());
        values.insert(
            "liveiso_hostname".to_string(),
            self.liveiso_hostname.clone(),
        );
        values.insert(
            "packages".to_string(),
            serde_json::to_string(&self.packages).unwrap_or_default(),
        );
        for (key, value) in &self.extra {
            values.insert(key.clone(), value_text(value));
        }
        values
    }

    fn validate(&self) -> Result<(), BuildError> {
        for (field, value) in [
            ("name", &self.name),
            ("id", &self.id),
            ("liveiso_hostname", &self.liveiso_hostname),
        ] {
            if value.trim().is_empty() {
                return Err(BuildError::Configuration {
                    message: format!("required field '{field}' is empty"),
                });
            }
        }
        Ok(())
    }
}

/// Load and validate the configuration document.
///
/// Fails with a configuration error before any filesystem mutation if a
/// required field is missing, empty, or of the wrong type.
pub fn load_config(path: &Path) -> Result<DistroConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading configuration '{}'", path.display()))?;
    let config: DistroConfig = serde_json::from_str(&raw).map_err(|err| {
        BuildError::Configuration {
            message: format!("invalid configuration '{}': {err}", path.display()),
        }
    })?;
    config.validate()?;
    Ok(config)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GOOD: &str = r#"{
        "name": "MyDistro",
        "id": "myos",
        "liveiso_hostname": "myos-live",
        "packages": ["vim", "git"],
        "tagline": "install in minutes"
    }"#;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_required_and_extra_fields() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&write_config(&temp, GOOD)).unwrap();

        assert_eq!(config.name, "MyDistro");
        assert_eq!(config.id, "myos");
        assert_eq!(config.packages, ["vim", "git"]);

        let values = config.template_values();
        assert_eq!(values["tagline"], "install in minutes");
        assert_eq!(values["liveiso_hostname"], "myos-live");
    }

    #[test]
    fn missing_required_field_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"{"name": "MyDistro", "packages": []}"#);

        let err = load_config(&path).unwrap_err();
        let build_err = err.downcast_ref::<BuildError>().unwrap();
        assert!(matches!(build_err, BuildError::Configuration { .. }));
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"{"name": " ", "id": "myos", "liveiso_hostname": "h", "packages": []}"#,
        );

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn derived_key_does_not_leak_into_template_values() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&write_config(&temp, GOOD)).unwrap();

        assert!(!config.template_values().contains_key("id-upper"));
    }
}
