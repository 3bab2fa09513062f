//! `AppConfig` struct, file location and TOML read/write.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;
use watchlist_api::movies::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Per-user config subdirectory.
const APP_DIR_NAME: &str = "watchlist";

/// Page sizes offered in the browser besides the configured one.
const STANDARD_PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct AppConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Initial view settings.
    #[serde(default)]
    pub view: ViewConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[allow(clippy::module_name_repetitions)]
pub struct ServerConfig {
    /// Base URL of the watchlist API (`movies` is resolved against it).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_secs: 10,
        }
    }
}

/// Initial view configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[allow(clippy::module_name_repetitions)]
pub struct ViewConfig {
    /// Movies per page.
    pub page_size: u32,
    /// Genres offered by the genre selector.
    pub genres: Vec<String>,
    /// Jump back to page 1 when genre, watched or rating changes.
    pub reset_page_on_filter_change: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            genres: vec![String::from("Action"), String::from("Comedy")],
            reset_page_on_filter_change: false,
        }
    }
}

impl AppConfig {
    /// Config file location: `{dir}/config.toml` when a directory is given,
    /// else `config.toml` under `$XDG_CONFIG_HOME/watchlist` or
    /// `$HOME/.config/watchlist`.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is given and neither variable is set.
    pub fn locate(dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = dir {
            return Ok(dir.join(CONFIG_FILE_NAME));
        }
        let base = config_home(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))?;
        Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Reads the config at `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            read => read.with_context(|| format!("failed to read {}", path.display()))?,
        };
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Writes the config to `path` as TOML, creating missing directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, directory creation or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_toml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Renders the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }
}

/// Base directory for per-user config files. An empty `XDG_CONFIG_HOME`
/// counts as unset.
fn config_home(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg));
    }
    let home = home.context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config"))
}

impl ServerConfig {
    /// Effective base URL: `override_url` if given, else the configured one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL does not parse.
    pub fn effective_base_url(&self, override_url: Option<&Url>) -> Result<Url> {
        if let Some(url) = override_url {
            return Ok(url.clone());
        }
        Url::parse(&self.base_url)
            .with_context(|| format!("invalid server.base_url: {}", self.base_url))
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ViewConfig {
    /// Configured page size.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is 0.
    pub fn page_size(&self) -> Result<NonZeroU32> {
        NonZeroU32::new(self.page_size).context("view.page_size must be at least 1")
    }

    /// Page sizes offered by the browser: the standard sizes plus the
    /// configured one, ascending.
    #[must_use]
    pub fn page_sizes(&self) -> Vec<NonZeroU32> {
        let mut sizes: Vec<NonZeroU32> = STANDARD_PAGE_SIZES
            .into_iter()
            .chain(std::iter::once(self.page_size))
            .filter_map(NonZeroU32::new)
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.server.base_url, "http://localhost:5000/api/");
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.view.page_size, 10);
        assert_eq!(config.view.genres, vec!["Action", "Comedy"]);
        assert!(!config.view.reset_page_on_filter_change);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            server: ServerConfig {
                base_url: String::from("https://movies.example.com/api/"),
                timeout_secs: 3,
            },
            view: ViewConfig {
                page_size: 20,
                genres: vec![String::from("Drama")],
                reset_page_on_filter_change: true,
            },
        };

        // Act
        let toml_str = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.view.genres.push(String::from("Horror"));

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[view]\npage_size = 5\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.view.page_size, 5);
        assert_eq!(config.view.genres, ViewConfig::default().genres);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_load_empty_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[view\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_load_unreadable_path_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let result = AppConfig::load(dir.path());

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to read"));
    }

    #[test]
    fn test_locate_with_dir() {
        // Arrange
        let dir = PathBuf::from("/srv/watchlist");

        // Act
        let path = AppConfig::locate(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/watchlist/config.toml"));
    }

    #[test]
    fn test_locate_default_is_per_user() {
        // Arrange & Act
        let path = AppConfig::locate(None).unwrap();

        // Assert
        assert!(path.ends_with("watchlist/config.toml"));
    }

    #[test]
    fn test_config_home_prefers_xdg() {
        // Arrange
        let xdg = Some(OsString::from("/xdg"));
        let home = Some(OsString::from("/home/ana"));

        // Act
        let base = config_home(xdg, home).unwrap();

        // Assert
        assert_eq!(base, PathBuf::from("/xdg"));
    }

    #[test]
    fn test_config_home_falls_back_to_home() {
        // Arrange
        let home = Some(OsString::from("/home/ana"));

        // Act
        let from_unset = config_home(None, home.clone()).unwrap();
        let from_empty = config_home(Some(OsString::new()), home).unwrap();

        // Assert
        assert_eq!(from_unset, PathBuf::from("/home/ana/.config"));
        assert_eq!(from_empty, PathBuf::from("/home/ana/.config"));
    }

    #[test]
    fn test_config_home_without_home_fails() {
        // Arrange & Act
        let result = config_home(None, None);

        // Assert
        assert!(result.unwrap_err().to_string().contains("HOME"));
    }

    #[test]
    fn test_effective_base_url() {
        // Arrange
        let server = ServerConfig::default();
        let override_url: Url = "http://10.0.0.5:8080/v2/".parse().unwrap();

        // Act
        let configured = server.effective_base_url(None).unwrap();
        let overridden = server.effective_base_url(Some(&override_url)).unwrap();

        // Assert
        assert_eq!(configured.as_str(), "http://localhost:5000/api/");
        assert_eq!(overridden, override_url);
    }

    #[test]
    fn test_invalid_base_url_fails() {
        // Arrange
        let server = ServerConfig {
            base_url: String::from("not a url"),
            ..ServerConfig::default()
        };

        // Act
        let result = server.effective_base_url(None);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_page_size_zero_fails() {
        // Arrange
        let view = ViewConfig {
            page_size: 0,
            ..ViewConfig::default()
        };

        // Act & Assert
        assert!(view.page_size().is_err());
        assert_eq!(ViewConfig::default().page_size().unwrap().get(), 10);
    }

    #[test]
    fn test_page_sizes_include_configured() {
        // Arrange
        let view = ViewConfig {
            page_size: 15,
            ..ViewConfig::default()
        };

        // Act
        let sizes: Vec<u32> = view.page_sizes().iter().map(|s| s.get()).collect();

        // Assert
        assert_eq!(sizes, vec![5, 10, 15, 20, 50]);
        assert_eq!(ViewConfig::default().page_sizes().len(), 4);
    }
}
