//! Application configuration, loaded from `config.toml` in the per-user
//! config directory.
//!
//! Every key is optional. A missing file yields the defaults, which leave the
//! archive disabled so the application works fully offline.
//!
//! ```toml
//! [archive]
//! backend = "http"          # "http" | "directory" | "disabled"
//! endpoint = "https://briefs.example.com"
//! timeout_secs = 30
//!
//! [storage]
//! data_dir = "/srv/briefgen"
//! ```

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Folder name used under the platform config and data directories.
pub const APP_DIR: &str = "briefgen";
pub const CONFIG_FILE: &str = "config.toml";
/// Overrides `archive.endpoint` and selects the HTTP backend.
pub const ARCHIVE_URL_ENV: &str = "BRIEFGEN_ARCHIVE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which archive collaborator to use (`archive.backend`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveKind {
    Http,
    Directory,
    #[default]
    Disabled,
}

/// `[archive]`: where generated PDFs are filed.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ArchiveConfig {
    pub backend: ArchiveKind,
    /// Base URL of the HTTP archive service. Required for `http`.
    pub endpoint: Option<String>,
    /// Root folder for the `directory` backend. Required for `directory`.
    pub directory: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            backend: ArchiveKind::Disabled,
            endpoint: None,
            directory: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[storage]`: local snapshot location.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    pub archive: ArchiveConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Point the archive at `url`, switching to the HTTP backend. Blank
    /// values are ignored.
    pub fn with_archive_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.archive.backend = ArchiveKind::Http;
            self.archive.endpoint = Some(url.trim().to_string());
        }
        self
    }

    /// Directory holding `storage.json` and the log file.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR)))
    }

    fn validate(&self) -> Result<(), AppError> {
        let a = &self.archive;
        if a.timeout_secs == 0 {
            return Err(AppError::Config(
                "archive.timeout_secs must be greater than zero".to_string(),
            ));
        }
        match a.backend {
            ArchiveKind::Http if a.endpoint.as_deref().map_or(true, |e| e.trim().is_empty()) => {
                Err(AppError::Config(
                    "archive.backend = \"http\" requires archive.endpoint".to_string(),
                ))
            }
            ArchiveKind::Directory if a.directory.is_none() => Err(AppError::Config(
                "archive.backend = \"directory\" requires archive.directory".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn from_toml(toml_str: &str) -> Result<AppConfig, AppError> {
    toml::from_str(toml_str).map_err(|e| AppError::Config(e.to_string()))
}

/// Parse and validate a TOML string.
pub fn parse(toml_str: &str) -> Result<AppConfig, AppError> {
    let cfg = from_toml(toml_str)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`, apply the archive URL override, and validate the result.
/// A missing file is not an error.
pub fn load(path: &Path, archive_url: Option<String>) -> Result<AppConfig, AppError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(text) => from_toml(&text)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            AppConfig::default()
        }
        Err(e) => {
            return Err(AppError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };
    let cfg = cfg.with_archive_url(archive_url);
    cfg.validate()?;
    Ok(cfg)
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// Load from the platform config directory, honouring [`ARCHIVE_URL_ENV`].
pub fn load_default() -> Result<AppConfig, AppError> {
    let env_url = std::env::var(ARCHIVE_URL_ENV).ok();
    match default_path() {
        Some(path) => load(&path, env_url),
        None => {
            let cfg = AppConfig::default().with_archive_url(env_url);
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
