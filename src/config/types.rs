// config/types.rs
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, time::Duration};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `GET {backend_url}/drinks`
    Remote,
    /// Directory compiled into the binary.
    Bundled,
    /// Directory read from `static_file`.
    File,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub source: SourceKind,
    pub static_file: Option<String>,
    pub dwell_ms: u64,
    pub spinner_ms: u64,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            source: SourceKind::Remote,
            static_file: None,
            dwell_ms: 1000,
            spinner_ms: 100,
            log_file: "~/.hot-drinks/hot-drinks.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to_file(&self, path: &str) -> io::Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let config_str = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, config_str)
    }

    /// Loads `path`, or writes the defaults there when it does not exist yet.
    pub fn load_or_init(path: &str) -> io::Result<Self> {
        match Self::load_from_file(path) {
            Ok(config) => Ok(config),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save_to_file(path)?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend()?;
        if self.dwell_ms == 0 {
            return Err(ConfigError::ZeroCadence("dwell_ms"));
        }
        if self.spinner_ms == 0 {
            return Err(ConfigError::ZeroCadence("spinner_ms"));
        }
        if self.source == SourceKind::File && self.static_file.is_none() {
            return Err(ConfigError::MissingStaticFile);
        }
        Ok(())
    }

    pub fn backend(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.backend_url).map_err(|source| ConfigError::BackendUrl {
            url: self.backend_url.clone(),
            source,
        })
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    pub fn spinner_cadence(&self) -> Duration {
        Duration::from_millis(self.spinner_ms)
    }

    pub fn log_path(&self) -> String {
        shellexpand::tilde(&self.log_file).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_constants() {
        let config = AppConfig::default();
        assert_eq!(config.dwell(), Duration::from_millis(1000));
        assert_eq!(config.spinner_cadence(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"backend_url": "http://drinks.local:9000", "source": "bundled"}"#)
                .unwrap();
        assert_eq!(config.backend_url, "http://drinks.local:9000");
        assert_eq!(config.source, SourceKind::Bundled);
        assert_eq!(config.dwell_ms, 1000);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig {
            backend_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BackendUrl { .. })
        ));

        config.backend_url = "http://localhost:8000".to_string();
        config.spinner_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCadence("spinner_ms"))
        ));

        config.spinner_ms = 100;
        config.source = SourceKind::File;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingStaticFile)
        ));
    }

    #[test]
    fn load_or_init_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("hot-drinks-config-{}", std::process::id()));
        let path = dir.join("config.json");
        let path = path.to_str().unwrap();
        let _ = fs::remove_file(path);

        let created = AppConfig::load_or_init(path).unwrap();
        assert_eq!(created.backend_url, AppConfig::default().backend_url);
        assert!(Path::new(path).exists());

        let reloaded = AppConfig::load_from_file(path).unwrap();
        assert_eq!(reloaded.dwell_ms, created.dwell_ms);
        let _ = fs::remove_dir_all(dir);
    }
}
