use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{ConfigError, WorkbaseError};

pub mod validation;

fn default_current_site() -> String {
    "default".to_string()
}

/// One registered site: the domain and scheme used to absolutize relative
/// URLs while this site is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub domain: String,
    pub scheme: String,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            domain: "localhost:8000".to_string(),
            scheme: "http".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesConfig {
    /// Name of the site used for URL resolution
    #[serde(default = "default_current_site")]
    pub current: String,

    /// Database file path
    pub database_path: PathBuf,

    /// Registered sites by name
    pub sites: HashMap<String, Site>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        let default_data_path = match ProjectDirs::from("io", "workbase", "workbase") {
            Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
            None => {
                // Graceful fallback to current directory if project dirs unavailable
                warn!("ProjectDirs unavailable; falling back to current directory for data path");
                PathBuf::from(".")
            }
        };

        let mut sites = HashMap::new();
        sites.insert(default_current_site(), Site::default());

        Self {
            current: default_current_site(),
            database_path: default_data_path.join("workbase.db"),
            sites,
        }
    }
}

impl SitesConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for Docker and development)
        dotenvy::dotenv().ok();

        // Start with default configuration
        let mut config = Self::default();

        // Override with file configuration if available
        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            let file_config: SitesConfig = toml::from_str(&content)?;
            config = file_config;
        }

        // Override with environment variables (highest priority)
        config.load_from_env();

        Ok(config)
    }

    /// Load configuration overrides from environment variables
    fn load_from_env(&mut self) {
        if let Ok(db_path) = env::var("WORKBASE_DATABASE_PATH") {
            self.database_path = PathBuf::from(db_path);
        }

        if let Ok(current) = env::var("WORKBASE_CURRENT_SITE") {
            self.current = current;
        }

        // Domain/scheme overrides apply to the current site, creating it if
        // the file did not register one under that name.
        if let Ok(domain) = env::var("WORKBASE_SITE_DOMAIN") {
            self.sites.entry(self.current.clone()).or_default().domain = domain;
        }

        if let Ok(scheme) = env::var("WORKBASE_SITE_SCHEME") {
            self.sites.entry(self.current.clone()).or_default().scheme = scheme;
        }
    }

    /// Resolve the current site record.
    pub fn current(&self) -> crate::error::Result<&Site> {
        self.sites.get(&self.current).ok_or_else(|| {
            WorkbaseError::Config(ConfigError::UnknownSite {
                name: self.current.clone(),
            })
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "workbase", "workbase")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_a_resolvable_current_site() {
        let config = SitesConfig::default();
        let site = config.current().unwrap();
        assert_eq!(site.domain, "localhost:8000");
        assert_eq!(site.scheme, "http");
    }

    #[test]
    fn test_unknown_current_site_is_an_error() {
        let mut config = SitesConfig::default();
        config.current = "staging".to_string();
        assert!(config.current().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = SitesConfig::default();
        config.sites.insert(
            "production".to_string(),
            Site {
                domain: "tracker.example.com".to_string(),
                scheme: "https".to_string(),
            },
        );
        config.current = "production".to_string();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: SitesConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.current, "production");
        assert_eq!(parsed.current().unwrap().domain, "tracker.example.com");
    }
}
