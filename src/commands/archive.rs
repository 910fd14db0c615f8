//! Archive listing command handler.

use crate::archive::{ArchiveBackend, ArchiveListing};

#[cfg(feature = "desktop")]
use crate::error::AppError;
#[cfg(feature = "desktop")]
use crate::state::AppState;

/// Never fails: an unreachable or unconfigured archive is reported as
/// [`ArchiveListing::Unavailable`].
pub async fn list_archive_inner(archive: &ArchiveBackend) -> ArchiveListing {
    archive.list().await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn list_archive(state: tauri::State<'_, AppState>) -> Result<ArchiveListing, AppError> {
    Ok(list_archive_inner(&state.archive).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::DirArchive;

    #[tokio::test]
    async fn empty_archive_is_available_not_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = ArchiveBackend::Directory(DirArchive::new(dir.path().to_path_buf()));
        let listing = list_archive_inner(&backend).await;
        assert_eq!(listing, ArchiveListing::Available { files: vec![] });
    }

    #[tokio::test]
    async fn uploaded_files_are_listed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = ArchiveBackend::Directory(DirArchive::new(dir.path().to_path_buf()));
        backend
            .upload(b"%PDF".to_vec(), "x_y_2026-03-01.pdf", "")
            .await
            .expect("upload");
        let listing = list_archive_inner(&backend).await;
        let files = listing.files().expect("available");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].client, "Uncategorized");
    }
}
