//! Transient user-facing notifications.
//!
//! Every failure is converted to a [`Notification`] at the boundary of the
//! action that caused it. Archive problems are always a `Warning`, never an
//! `Error`, so they cannot be mistaken for a failed document.

use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::{ArchiveStatus, DownloadStatus, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&AppError> for Notification {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::SchemaValidation(m) => Notification::new(Level::Error, "Invalid brief", m),
            AppError::Render(_) => Notification::new(
                Level::Error,
                "Failed to generate PDF",
                "An error occurred while generating the PDF. Please try again.",
            ),
            AppError::ArchiveUnavailable(m) => Notification::new(
                Level::Warning,
                format!("Archive Error: {m}"),
                "Ensure archive storage is configured.",
            ),
            AppError::InvalidEdit(m) => Notification::new(Level::Error, "Edit rejected", m),
            AppError::ConfirmationRequired => Notification::new(
                Level::Warning,
                "Confirmation required",
                "Confirm to clear the form. This cannot be undone.",
            ),
            AppError::NotFound(m) => Notification::new(Level::Error, "Not found", m),
            AppError::Store(m) => Notification::new(Level::Error, "Storage error", m),
            AppError::Config(m) => Notification::new(Level::Error, "Configuration error", m),
            AppError::Io(m) => Notification::new(Level::Error, "File error", m),
        }
    }
}

impl SubmitOutcome {
    /// Notifications for a finished submit, one per delivery leg.
    pub fn notifications(&self) -> Vec<Notification> {
        let mut out = Vec::new();
        match (&self.download, &self.archive) {
            (DownloadStatus::Saved { .. }, ArchiveStatus::Archived) => out.push(Notification::new(
                Level::Success,
                "PDF generated and saved to Archive!",
                "The brief has been successfully generated and archived.",
            )),
            (DownloadStatus::Saved { path }, _) => out.push(Notification::new(
                Level::Success,
                "PDF generated",
                format!("Saved to {}", path.display()),
            )),
            (DownloadStatus::Failed { reason }, _) => out.push(Notification::new(
                Level::Error,
                "Failed to save PDF",
                reason.clone(),
            )),
        }
        if let ArchiveStatus::Failed { reason } = &self.archive {
            out.push(Notification::from(&AppError::ArchiveUnavailable(
                reason.clone(),
            )));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn outcome(download: DownloadStatus, archive: ArchiveStatus) -> SubmitOutcome {
        SubmitOutcome {
            file_name: "a.pdf".to_string(),
            download,
            archive,
        }
    }

    fn saved() -> DownloadStatus {
        DownloadStatus::Saved {
            path: PathBuf::from("/tmp/a.pdf"),
        }
    }

    #[test]
    fn full_success_is_a_single_toast() {
        let n = outcome(saved(), ArchiveStatus::Archived).notifications();
        assert_eq!(n.len(), 1);
        assert_eq!(n[0].level, Level::Success);
        assert_eq!(n[0].title, "PDF generated and saved to Archive!");
    }

    #[test]
    fn archive_failure_is_a_distinct_warning() {
        let n = outcome(
            saved(),
            ArchiveStatus::Failed {
                reason: "connection refused".to_string(),
            },
        )
        .notifications();
        let levels: Vec<Level> = n.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![Level::Success, Level::Warning]);
        assert_eq!(n[1].title, "Archive Error: connection refused");
        assert!(n.iter().all(|n| n.level != Level::Error));
    }

    #[test]
    fn skipped_archive_only_reports_the_download() {
        let n = outcome(saved(), ArchiveStatus::Skipped).notifications();
        assert_eq!(n.len(), 1);
        assert_eq!(n[0].title, "PDF generated");
    }

    #[test]
    fn render_error_maps_to_generation_failure() {
        let n = Notification::from(&AppError::Render("font".to_string()));
        assert_eq!(n.level, Level::Error);
        assert_eq!(n.title, "Failed to generate PDF");
    }

    #[test]
    fn schema_error_keeps_the_reason() {
        let n = Notification::from(&AppError::SchemaValidation("general: required section missing".to_string()));
        assert_eq!(n.level, Level::Error);
        assert!(n.description.contains("general"));
    }
}
