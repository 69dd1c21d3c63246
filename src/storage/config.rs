use super::Result;
use crate::api::requests::RequestCatalog;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "sonar-report";
const CONFIG_FILE: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub requests: RequestCatalog,
}

/// One named server. The token is never stored here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub server_url: String,
    pub branch: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Read the configuration at `path`, or at the platform default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("No configuration at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("{}: {}", config_path.display(), e),
            })?;

        Ok(config)
    }

    /// `config.toml` inside `dir`, or inside the platform config directory.
    pub fn file_in(dir: Option<&str>) -> Result<PathBuf> {
        match dir {
            Some(dir) => Ok(PathBuf::from(dir).join(CONFIG_FILE)),
            None => Self::config_file_path(),
        }
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
        assert_eq!(config.requests, RequestCatalog::default());
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();
        let profile = Profile {
            server_url: "http://sonar.example.test".to_string(),
            branch: Some("develop".to_string()),
            timeout_seconds: Some(60),
        };
        config.profiles.insert("ci".to_string(), profile.clone());

        assert_eq!(config.get_profile("ci"), Some(&profile));
        assert!(config.get_profile("nonexistent").is_none());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("config.toml")))
            .expect("Missing file should not fail");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_requests_table_keeps_other_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
default_profile = "local"

[profiles.local]
server_url = "http://localhost:9000"

[requests]
page_size = 250
server_info = "{}/api/server/version"
"#,
        )
        .expect("Failed to write config");

        let config = Config::load(Some(config_path)).expect("Failed to load config");
        let defaults = RequestCatalog::default();

        assert_eq!(config.requests.page_size, 250);
        assert_eq!(config.requests.server_info, "{}/api/server/version");
        assert_eq!(config.requests.issues, defaults.issues);
        assert_eq!(
            config.get_profile("local").map(|p| p.server_url.as_str()),
            Some("http://localhost:9000")
        );
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "profiles = [not toml").expect("Failed to write config");

        match Config::load(Some(config_path)) {
            Err(StorageError::ConfigParseError { message }) => {
                assert!(message.contains("config.toml"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_in_explicit_dir() {
        let path = Config::file_in(Some("/tmp/sonar")).expect("Explicit dir should resolve");
        assert_eq!(path, PathBuf::from("/tmp/sonar/config.toml"));
    }
}
