//! Local folder archive: `<root>/<client>/<file>.pdf`.
//!
//! For installations without an archive service, e.g. a shared network
//! drive. A root that does not exist yet is an empty archive.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::ArchivedFile;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

fn unavailable(context: &str, path: &Path, e: std::io::Error) -> AppError {
    AppError::ArchiveUnavailable(format!("{context} {}: {e}", path.display()))
}

/// Client names become a single path component.
fn folder_name(client: &str) -> String {
    let name: String = client
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    match name.as_str() {
        "." | ".." => name.replace('.', "_"),
        _ => name,
    }
}

impl DirArchive {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every PDF under the root, newest first.
    pub async fn list(&self) -> Result<Vec<ArchivedFile>, AppError> {
        let mut files = Vec::new();
        let mut clients = match tokio::fs::read_dir(&self.root).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(files),
            Err(e) => return Err(unavailable("cannot read", &self.root, e)),
        };

        while let Some(client_dir) = clients
            .next_entry()
            .await
            .map_err(|e| unavailable("cannot read", &self.root, e))?
        {
            let dir_path = client_dir.path();
            if !client_dir.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let client = client_dir.file_name().to_string_lossy().into_owned();
            let mut entries = tokio::fs::read_dir(&dir_path)
                .await
                .map_err(|e| unavailable("cannot read", &dir_path, e))?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| unavailable("cannot read", &dir_path, e))?
            {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !name.ends_with(".pdf") {
                    continue;
                }
                let meta = entry
                    .metadata()
                    .await
                    .map_err(|e| unavailable("cannot stat", &entry.path(), e))?;
                if !meta.is_file() {
                    continue;
                }
                let created_at: DateTime<Utc> = meta
                    .modified()
                    .map(DateTime::from)
                    .unwrap_or_else(|_| Utc::now());
                files.push(ArchivedFile {
                    path: format!("{client}/{name}"),
                    name,
                    client: client.clone(),
                    created_at,
                    size: meta.len(),
                });
            }
        }

        files.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(files)
    }

    /// Write `bytes` to `<root>/<client>/<filename>`, replacing any file of
    /// the same name.
    pub async fn upload(&self, bytes: &[u8], filename: &str, client: &str) -> Result<(), AppError> {
        let file_name = Path::new(filename)
            .file_name()
            .filter(|n| n.to_string_lossy() == filename)
            .ok_or_else(|| {
                AppError::ArchiveUnavailable(format!("invalid archive file name: {filename:?}"))
            })?;
        let dir = self.root.join(folder_name(client));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| unavailable("cannot create", &dir, e))?;

        let target = dir.join(file_name);
        let tmp = dir.join(format!("{filename}.tmp"));
        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(unavailable("cannot write", &tmp, e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(unavailable("cannot write", &target, e));
        }
        Ok(())
    }
}
