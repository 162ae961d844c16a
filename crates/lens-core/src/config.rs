//! lens.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub cors: CorsConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("q-vercel-latency.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `["*"]` allows any origin; an empty list allows none.
    pub allow_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Threshold used for the breach gauge in the Prometheus exposition.
    pub default_threshold_ms: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            default_threshold_ms: 180.0,
        }
    }
}

impl LensConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = LensConfig::from_toml_str("").unwrap();
        assert_eq!(config, LensConfig::default());
        assert_eq!(config.server.port, 8000);
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[server]
port = 9090

[dataset]
path = "/srv/telemetry.json"

[cors]
allow_origins = ["https://dash.example.com"]
"#;
        let config = LensConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset.path, PathBuf::from("/srv/telemetry.json"));
        assert!(!config.cors.allows_any_origin());
        assert_eq!(config.metrics.default_threshold_ms, 180.0);
    }

    #[test]
    fn test_empty_origin_list_allows_none() {
        let config = LensConfig::from_toml_str("[cors]\nallow_origins = []\n").unwrap();
        assert!(config.cors.allow_origins.is_empty());
        assert!(!config.cors.allows_any_origin());
    }

    #[test]
    fn test_render_roundtrip() {
        let config = LensConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("q-vercel-latency.json"));
        assert_eq!(LensConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lens.toml");
        std::fs::write(&path, "[metrics]\ndefault_threshold_ms = 150.5\n").unwrap();
        let config = LensConfig::from_file(&path).unwrap();
        assert_eq!(config.metrics.default_threshold_ms, 150.5);
    }

    #[test]
    fn test_missing_file() {
        let err = LensConfig::from_file(Path::new("/nonexistent/lens.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = LensConfig::from_toml_str("[server]\nport = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
