//! Submit flow: render once, then deliver the PDF to the local target
//! directory and to the archive.
//!
//! The two delivery legs run concurrently and report independently. A
//! render failure aborts before anything is written; an archive failure
//! never touches the local file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::archive::ArchiveBackend;
use crate::brief::io::write_atomic;
use crate::brief::BriefData;
use crate::error::AppError;
use crate::render::{artifact_file_name, render_brief};
use crate::store::SavedBrief;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DownloadStatus {
    Saved { path: PathBuf },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ArchiveStatus {
    Archived,
    /// No upload was attempted (regeneration of a saved brief).
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub file_name: String,
    pub download: DownloadStatus,
    pub archive: ArchiveStatus,
}

/// Render on the blocking pool; the PDF build is CPU-bound.
async fn render_blocking(data: BriefData, today: NaiveDate) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || render_brief(&data, today))
        .await
        .map_err(|e| AppError::Render(format!("render task failed: {e}")))?
}

async fn write_local(path: PathBuf, bytes: Vec<u8>) -> DownloadStatus {
    let result = tokio::task::spawn_blocking({
        let path = path.clone();
        move || write_atomic(&path, &bytes)
    })
    .await
    .map_err(|e| AppError::Io(format!("write task failed: {e}")))
    .and_then(|r| r);

    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "brief PDF saved");
            DownloadStatus::Saved { path }
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "brief PDF could not be saved");
            DownloadStatus::Failed {
                reason: e.to_string(),
            }
        }
    }
}

fn file_name_for(data: &BriefData, today: NaiveDate) -> String {
    artifact_file_name(&data.general.client_brand, &data.general.project_name, today)
}

/// Render `data`, save it into `target_dir` and upload it to `archive`.
pub async fn generate_and_deliver(
    data: &BriefData,
    target_dir: &Path,
    archive: &ArchiveBackend,
    today: NaiveDate,
) -> Result<SubmitOutcome, AppError> {
    let file_name = file_name_for(data, today);
    let bytes = render_blocking(data.clone(), today).await?;

    let local_copy = bytes.clone();
    let (download, upload) = tokio::join!(
        write_local(target_dir.join(&file_name), local_copy),
        archive.upload(bytes, &file_name, &data.general.client_brand),
    );

    let archive = match upload {
        Ok(()) => ArchiveStatus::Archived,
        Err(e) => {
            tracing::warn!(file_name, error = %e, "archive upload failed; local copy kept");
            ArchiveStatus::Failed {
                reason: e.to_string(),
            }
        }
    };

    Ok(SubmitOutcome {
        file_name,
        download,
        archive,
    })
}

/// Re-render a saved brief into `target_dir`. Nothing is uploaded.
pub async fn regenerate(
    saved: &SavedBrief,
    target_dir: &Path,
    today: NaiveDate,
) -> Result<SubmitOutcome, AppError> {
    let file_name = file_name_for(&saved.data, today);
    let bytes = render_blocking(saved.data.clone(), today).await?;
    let download = write_local(target_dir.join(&file_name), bytes).await;
    tracing::debug!(id = %saved.id, file_name, "saved brief regenerated");
    Ok(SubmitOutcome {
        file_name,
        download,
        archive: ArchiveStatus::Skipped,
    })
}
