//! Archive collaborator: durable storage of generated PDFs, grouped by
//! client.
//!
//! The archive is best-effort. Listing failures become
//! [`ArchiveListing::Unavailable`] (distinct from an empty archive) and
//! upload failures become [`AppError::ArchiveUnavailable`], which callers
//! report as a warning next to a successful local download.

pub mod dir;
pub mod http;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ArchiveConfig, ArchiveKind};
use crate::error::AppError;

pub use dir::DirArchive;
pub use http::HttpArchive;

/// Folder used for uploads whose client name is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

const NOT_CONFIGURED: &str = "archive storage is not configured";

/// One stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedFile {
    pub name: String,
    pub client: String,
    pub created_at: DateTime<Utc>,
    /// Size in bytes.
    pub size: u64,
    /// Retrieval path relative to the archive root.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ArchiveListing {
    Available { files: Vec<ArchivedFile> },
    Unavailable { reason: String },
}

impl ArchiveListing {
    pub fn files(&self) -> Option<&[ArchivedFile]> {
        match self {
            ArchiveListing::Available { files } => Some(files),
            ArchiveListing::Unavailable { .. } => None,
        }
    }
}

/// Client folder for an upload: the trimmed name, or [`UNCATEGORIZED`].
pub fn client_folder(client: &str) -> &str {
    let trimmed = client.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED
    } else {
        trimmed
    }
}

#[derive(Debug)]
pub enum ArchiveBackend {
    Http(HttpArchive),
    Directory(DirArchive),
    Disabled,
}

impl ArchiveBackend {
    pub fn from_config(cfg: &ArchiveConfig) -> Result<Self, AppError> {
        match cfg.backend {
            ArchiveKind::Http => {
                let endpoint = cfg.endpoint.as_deref().ok_or_else(|| {
                    AppError::Config("archive.endpoint is not set".to_string())
                })?;
                Ok(Self::Http(HttpArchive::new(
                    endpoint,
                    Duration::from_secs(cfg.timeout_secs),
                )?))
            }
            ArchiveKind::Directory => {
                let root = cfg.directory.clone().ok_or_else(|| {
                    AppError::Config("archive.directory is not set".to_string())
                })?;
                Ok(Self::Directory(DirArchive::new(root)))
            }
            ArchiveKind::Disabled => Ok(Self::Disabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub async fn list(&self) -> ArchiveListing {
        let result = match self {
            Self::Http(a) => a.list().await,
            Self::Directory(a) => a.list().await,
            Self::Disabled => Err(AppError::ArchiveUnavailable(NOT_CONFIGURED.to_string())),
        };
        match result {
            Ok(files) => ArchiveListing::Available { files },
            Err(e) => {
                tracing::warn!(error = %e, "archive listing unavailable");
                ArchiveListing::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Store `bytes` as `filename` under the client's folder.
    pub async fn upload(&self, bytes: Vec<u8>, filename: &str, client: &str) -> Result<(), AppError> {
        let client = client_folder(client);
        let result = match self {
            Self::Http(a) => a.upload(bytes, filename, client).await,
            Self::Directory(a) => a.upload(&bytes, filename, client).await,
            Self::Disabled => Err(AppError::ArchiveUnavailable(NOT_CONFIGURED.to_string())),
        };
        result?;
        tracing::info!(filename, client, "brief archived");
        Ok(())
    }
}
