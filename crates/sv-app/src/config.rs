//! Application configuration loaded from YAML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sv_gateway::{DEFAULT_ENGINE_PROGRAM, EngineCommand};

use crate::error::{AppError, AppResult};

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "schedview.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Bounded wait for the engine; absent means wait until it exits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_ENGINE_PROGRAM),
            args: Vec::new(),
            timeout_ms: None,
        }
    }
}

impl EngineConfig {
    pub fn to_command(&self) -> EngineCommand {
        EngineCommand::new(self.program.clone())
            .with_args(self.args.iter().cloned())
            .with_timeout(self.timeout_ms.map(Duration::from_millis))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl AppConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.engine.program.as_os_str().is_empty() {
            return Err(AppError::Config("engine.program must not be empty".to_string()));
        }
        if self.engine.timeout_ms == Some(0) {
            return Err(AppError::Config(
                "engine.timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load config from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AppConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    config.validate()?;

    Ok(config)
}

/// Load the explicit config file, or [`DEFAULT_CONFIG_FILE`] when it exists,
/// or fall back to built-in defaults.
pub fn load_config_or_default(explicit: Option<&Path>) -> AppResult<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        tracing::debug!(path = DEFAULT_CONFIG_FILE, "loading config");
        return load_config(default_path);
    }
    Ok(AppConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("engine:\n  timeout_ms: 2500\n").unwrap();
        assert_eq!(config.engine.program, PathBuf::from(DEFAULT_ENGINE_PROGRAM));
        assert_eq!(config.output.format, OutputFormat::Html);

        let command = config.engine.to_command();
        assert_eq!(command.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config: AppConfig = serde_yaml::from_str("engine:\n  timeout_ms: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_or_default(Some(Path::new("/nonexistent/schedview.yaml")))
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigFileRead { .. }));
    }

    #[test]
    fn loads_full_file() {
        let path = std::env::temp_dir().join("sv_app_config_full.yaml");
        std::fs::write(
            &path,
            "engine:\n  program: /opt/sched/engine\n  args: [--quiet]\noutput:\n  format: json\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.engine.program, PathBuf::from("/opt/sched/engine"));
        assert_eq!(config.engine.args, vec!["--quiet".to_string()]);
        assert_eq!(config.output.format, OutputFormat::Json);
    }
}
