//! Saved-brief library command handlers.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::archive::UNCATEGORIZED;
use crate::brief::BriefData;
use crate::error::AppError;
use crate::form::BriefForm;
use crate::store::{SavedBrief, SnapshotStore};

#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{persist, read_form, write_form};

/// Record a copy of the live brief under its client and project names.
pub fn save_brief_inner(
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<SavedBrief, AppError> {
    let data = read_form(form_lock)?.data().clone();
    let client = data.client_name().unwrap_or(UNCATEGORIZED).to_string();
    let project = data.project_name().unwrap_or("Untitled").to_string();
    store.save_brief(&client, &project, &data)
}

/// Saved briefs grouped by client, each group newest first.
pub fn list_saved_briefs_inner(
    store: &SnapshotStore,
) -> BTreeMap<String, Vec<SavedBrief>> {
    store.group_by_client()
}

/// Replace the live brief with a saved one.
pub fn load_saved_brief_inner(
    id: &str,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<BriefData, AppError> {
    let saved = store
        .get_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("saved brief {id} not found")))?;
    let mut form = write_form(form_lock)?;
    form.load_external(saved.data);
    persist(store, form.data());
    Ok(form.data().clone())
}

pub fn delete_saved_brief_inner(id: &str, store: &SnapshotStore) -> Result<(), AppError> {
    store.delete(id)?;
    tracing::info!(id, "saved brief deleted");
    Ok(())
}

// ── Tauri command wrappers ───────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn save_brief(state: tauri::State<'_, AppState>) -> Result<SavedBrief, AppError> {
    save_brief_inner(&state.form, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn list_saved_briefs(
    state: tauri::State<'_, AppState>,
) -> Result<BTreeMap<String, Vec<SavedBrief>>, AppError> {
    Ok(list_saved_briefs_inner(&state.store))
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn load_saved_brief(
    id: String,
    state: tauri::State<'_, AppState>,
) -> Result<BriefData, AppError> {
    load_saved_brief_inner(&id, &state.form, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn delete_saved_brief(
    id: String,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    delete_saved_brief_inner(&id, &state.store)
}

// ── Tests ────────────────────────────────────────────────────────────────────
