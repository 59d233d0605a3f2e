//! Configuration file support for mvn-dep-graph.
//!
//! Provides YAML-based configuration through `mvn-dep-graph.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "mvn-dep-graph.config.yml";

/// Upper bound for concurrent checksum lookups
const MAX_CHECKSUM_CONCURRENCY: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub include_test_scope: Option<bool>,
    pub verbose: Option<bool>,
    pub aggregate: Option<bool>,
    pub label_scopes: Option<bool>,
    pub checksums: Option<bool>,
    pub checksum_concurrency: Option<usize>,
    pub repository: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes to YAML null
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!(
                "Invalid config: {}\n\n💡 Hint: Set 'format' to \"json\" or \"markdown\".",
                e
            );
        }
    }
    if let Some(concurrency) = config.checksum_concurrency {
        if !(1..=MAX_CHECKSUM_CONCURRENCY).contains(&concurrency) {
            bail!(
                "Invalid config: checksum_concurrency must be between 1 and {} (got {}).\n\n\
                 💡 Hint: The default of 5 suits most local repositories.",
                MAX_CHECKSUM_CONCURRENCY,
                concurrency
            );
        }
    }
    if let Some(ref repository) = config.repository {
        if repository.as_os_str().is_empty() {
            bail!(
                "Invalid config: repository must not be empty.\n\n\
                 💡 Hint: Remove the field to use ~/.m2/repository."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: markdown
include_test_scope: true
verbose: false
aggregate: true
label_scopes: true
checksums: true
checksum_concurrency: 8
repository: /opt/m2/repository
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format.as_deref(), Some("markdown"));
        assert_eq!(config.include_test_scope, Some(true));
        assert_eq!(config.verbose, Some(false));
        assert_eq!(config.aggregate, Some(true));
        assert_eq!(config.label_scopes, Some(true));
        assert_eq!(config.checksums, Some(true));
        assert_eq!(config.checksum_concurrency, Some(8));
        assert_eq!(
            config.repository,
            Some(PathBuf::from("/opt/m2/repository"))
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: json\nchecksums: false\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(config.checksums, Some(false));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("empty.yml");
        fs::write(&config_path, "\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.format.is_none());
    }

    #[test]
    fn test_invalid_format_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: xml\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Invalid format"));
    }

    #[test]
    fn test_checksum_concurrency_bounds() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");

        for value in ["0", "65"] {
            fs::write(&config_path, format!("checksum_concurrency: {}\n", value)).unwrap();
            let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
            assert!(err.contains("checksum_concurrency must be between 1 and 64"));
        }

        fs::write(&config_path, "checksum_concurrency: 64\n").unwrap();
        assert!(load_config_from_path(&config_path).is_ok());
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "format: json\nexclude_packages: [a]\ncheck_cve: true\n",
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("exclude_packages"));
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.format.is_none());
        assert!(config.checksum_concurrency.is_none());
        assert!(config.repository.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
