//! JSON import / export command handlers.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::brief::{io, BriefData};
use crate::error::AppError;
use crate::form::BriefForm;
use crate::store::SnapshotStore;

#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{persist, read_form, write_form};

// ── import_brief ─────────────────────────────────────────────────────────────

/// Replace the live brief with the contents of `path`.
///
/// An unreadable or invalid file leaves the live value as it was.
pub fn import_brief_inner(
    path: &Path,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<BriefData, AppError> {
    let data = io::import_from_path(path).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "brief import rejected");
    })?;
    let mut form = write_form(form_lock)?;
    form.load_external(data);
    persist(store, form.data());
    tracing::info!(path = %path.display(), "brief imported");
    Ok(form.data().clone())
}

// ── export_brief ─────────────────────────────────────────────────────────────

/// Write the live brief as JSON into `dir`; returns the file path.
pub fn export_brief_inner(
    dir: &Path,
    form_lock: &RwLock<BriefForm>,
) -> Result<PathBuf, AppError> {
    let data = read_form(form_lock)?.data().clone();
    io::export_to_dir(&data, dir)
}

// ── Tauri command wrappers ───────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn import_brief(
    path: String,
    state: tauri::State<'_, AppState>,
) -> Result<BriefData, AppError> {
    import_brief_inner(Path::new(&path), &state.form, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn export_brief(
    dir: String,
    state: tauri::State<'_, AppState>,
) -> Result<PathBuf, AppError> {
    export_brief_inner(Path::new(&dir), &state.form)
}

// ── Tests ────────────────────────────────────────────────────────────────────
