use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pipeline: PipelineConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub frontend_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            workers: 1,
            frontend_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn frontend_dir(&self) -> PathBuf {
        if let Some(dir) = &self.frontend_dir {
            return dir.clone();
        }
        match std::env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest_dir) => Path::new(&manifest_dir).join("../frontend/dist"),
            Err(_) => PathBuf::from("/usr/src/app/frontend/dist"),
        }
    }
}

/// How the Python worker hosting the pricing pipeline is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub interpreter: String,
    pub artifact: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            artifact: PathBuf::from("vehicle_price_prediction.pkl"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Reads the YAML file named by `APP_CONFIG` (or `config/app.yaml` when
    /// present), then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("APP_CONFIG").ok().map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env(&lookup, "PORT")? {
            self.server.port = port;
        }
        if let Some(workers) = parse_env(&lookup, "WORKERS")? {
            self.server.workers = workers;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.server.frontend_dir = Some(PathBuf::from(dir));
        }
        if let Some(interpreter) = lookup("PYTHON_BIN") {
            self.pipeline.interpreter = interpreter;
        }
        if let Some(artifact) = lookup("MODEL_PATH") {
            self.pipeline.artifact = PathBuf::from(artifact);
        }
        if let Some(max_bytes) = parse_env(&lookup, "MAX_UPLOAD_BYTES")? {
            self.upload.max_bytes = max_bytes;
        }
        Ok(())
    }
}

fn parse_env<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_a_single_worker_server() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.server.workers, 1);
        assert_eq!(config.pipeline.interpreter, "python3");
        assert_eq!(config.pipeline.artifact, PathBuf::from("vehicle_price_prediction.pkl"));
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9000\npipeline:\n  artifact: models/pipe.pkl").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pipeline.artifact, PathBuf::from("models/pipe.pkl"));
        assert_eq!(config.pipeline.interpreter, "python3");
    }

    #[test]
    fn malformed_yaml_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [not, a, map").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[
                ("PORT", "8080"),
                ("MODEL_PATH", "/models/vehicle.pkl"),
                ("PYTHON_BIN", "/opt/venv/bin/python"),
                ("MAX_UPLOAD_BYTES", "2048"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pipeline.artifact, PathBuf::from("/models/vehicle.pkl"));
        assert_eq!(config.pipeline.interpreter, "/opt/venv/bin/python");
        assert_eq!(config.upload.max_bytes, 2048);
    }

    #[test]
    fn bad_numeric_override_names_the_variable() {
        let mut config = AppConfig::default();
        let err = config.apply_overrides(env(&[("WORKERS", "many")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"many\" for environment variable WORKERS"
        );
    }

    #[test]
    fn explicit_frontend_dir_wins() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[("FRONTEND_DIR", "/srv/dist")])).unwrap();
        assert_eq!(config.server.frontend_dir(), PathBuf::from("/srv/dist"));
    }
}
