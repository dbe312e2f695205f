/// Client configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use setlist_client::{
    ClientConfig, FileTokenStorage, TokenStorage, UnavailableTokenStorage,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE: &str = "setlist.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Keep the session between runs. When off, every run starts anonymous.
    #[serde(default = "default_persist_token")]
    pub persist_token: bool,

    #[serde(default = "default_token_file")]
    pub token_file: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from `setlist.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. SETLIST_API__BASE_URL
        settings = settings.add_source(
            config::Environment::with_prefix("SETLIST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.client_config()
            .normalized()
            .map_err(|e| CliError::Config(format!("api.base_url: {}", e)))?;

        if let Some(file) = &self.storage.token_file {
            if file.is_dir() {
                return Err(CliError::Config(format!(
                    "storage.token_file points to a directory: {:?}",
                    file
                )));
            }
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
    }

    /// Token storage for this run.
    ///
    /// Falls back to unavailable storage when persistence is off or no data
    /// directory could be determined.
    pub fn token_storage(&self) -> Arc<dyn TokenStorage> {
        match (&self.storage.token_file, self.storage.persist_token) {
            (Some(file), true) => Arc::new(FileTokenStorage::new(file)),
            (None, true) => {
                tracing::warn!("No data directory found, session will not be kept");
                Arc::new(UnavailableTokenStorage)
            }
            (_, false) => Arc::new(UnavailableTokenStorage),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        persist_token: default_persist_token(),
        token_file: default_token_file(),
    }
}

fn default_persist_token() -> bool {
    true
}

fn default_token_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("setlist").join("session.json"))
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            storage: default_storage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.storage.persist_token);
        if let Some(file) = &config.storage.token_file {
            assert!(file.ends_with("setlist/session.json"));
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://music.example.com/\"\n\n[storage]\npersist_token = false\n"
        )
        .unwrap();

        let config = CliConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.api.base_url, "https://music.example.com/");
        assert!(!config.storage.persist_token);
        assert!(!config.token_storage().is_available());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            CliConfig::load_from(Some(&missing)),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:8080".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_directory_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.token_file = Some(dir.path().to_path_buf());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_storage_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();

        config.storage.token_file = Some(dir.path().join("session.json"));
        assert!(config.token_storage().is_available());

        config.storage.token_file = None;
        assert!(!config.token_storage().is_available());
    }
}
