use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::proximity::ProximityRule;

/// Engine configuration: where the standard documents live and which
/// compound-condition rules to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub standards_dir: PathBuf,
    pub proximity: Vec<ProximityRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standards_dir: PathBuf::from("standards"),
            proximity: vec![ProximityRule::default()],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl EngineConfig {
    /// Loads configuration from an explicit TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from the per-user config file, falling back to defaults when it
    /// is missing or unreadable.
    pub fn load_default() -> Self {
        if let Some(config_path) = Self::config_file_path()
            && let Ok(content) = std::fs::read_to_string(config_path)
            && let Ok(config) = toml::from_str(&content)
        {
            return config;
        }
        Self::default()
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("hazardsense");
            path.push("config.toml");
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.standards_dir, PathBuf::from("standards"));
        assert_eq!(config.proximity.len(), 1);
        assert_eq!(config.proximity[0].condition, "forklift_pedestrian_proximity");
        assert_eq!(config.proximity[0].distance_threshold, 200.0);
    }

    #[test]
    fn config_deserialization() {
        let toml_str = r#"
standards_dir = "/etc/hazardsense/standards"

[[proximity]]
person_condition = "person"
vehicle_condition = "crane"
condition = "crane_pedestrian_proximity"
distance_threshold = 120.0
"#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.standards_dir,
            PathBuf::from("/etc/hazardsense/standards")
        );
        assert_eq!(config.proximity.len(), 1);
        assert_eq!(config.proximity[0].vehicle_condition, "crane");
        assert_eq!(config.proximity[0].distance_threshold, 120.0);
    }

    #[test]
    fn partial_proximity_rule_uses_defaults() {
        let toml_str = r#"
[[proximity]]
distance_threshold = 150.0
"#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.standards_dir, PathBuf::from("standards"));
        assert_eq!(config.proximity[0].person_condition, "person");
        assert_eq!(config.proximity[0].vehicle_condition, "forklift");
        assert_eq!(config.proximity[0].distance_threshold, 150.0);
    }

    #[test]
    fn config_round_trip() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "standards_dir = \"rules\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.standards_dir, PathBuf::from("rules"));
        // Missing proximity section falls back to the reference rule.
        assert_eq!(config.proximity.len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EngineConfig::load("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "standards_dir = [not toml").unwrap();

        let err = EngineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
