//! PDF generation command handlers.

use std::path::Path;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::Serialize;

use crate::archive::ArchiveBackend;
use crate::error::AppError;
use crate::form::BriefForm;
use crate::notify::Notification;
use crate::pipeline::{self, SubmitOutcome};
use crate::store::SnapshotStore;

#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{persist, read_form, write_form};

/// Result of a generate request: per-leg status plus the toasts to show.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    pub notifications: Vec<Notification>,
}

impl From<SubmitOutcome> for Delivery {
    fn from(outcome: SubmitOutcome) -> Self {
        let notifications = outcome.notifications();
        Self {
            outcome,
            notifications,
        }
    }
}

// ── generate_brief ───────────────────────────────────────────────────────────

/// Render the live brief and deliver it. The form lock is released before
/// rendering starts.
pub async fn generate_brief_inner(
    target_dir: &Path,
    form_lock: &RwLock<BriefForm>,
    archive: &ArchiveBackend,
    today: NaiveDate,
) -> Result<Delivery, AppError> {
    let data = read_form(form_lock)?.data().clone();
    let outcome = pipeline::generate_and_deliver(&data, target_dir, archive, today).await?;
    Ok(outcome.into())
}

// ── regenerate_saved_brief ───────────────────────────────────────────────────

/// Load a saved brief into the form and render it to `target_dir`.
pub async fn regenerate_saved_brief_inner(
    id: &str,
    target_dir: &Path,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
    today: NaiveDate,
) -> Result<Delivery, AppError> {
    let saved = store
        .get_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("saved brief {id} not found")))?;
    {
        let mut form = write_form(form_lock)?;
        form.load_external(saved.data.clone());
        persist(store, form.data());
    }
    let outcome = pipeline::regenerate(&saved, target_dir, today).await?;
    Ok(outcome.into())
}

// ── Tauri command wrappers ───────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn generate_brief(
    target_dir: String,
    state: tauri::State<'_, AppState>,
) -> Result<Delivery, AppError> {
    generate_brief_inner(
        Path::new(&target_dir),
        &state.form,
        &state.archive,
        super::today(),
    )
    .await
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn regenerate_saved_brief(
    id: String,
    target_dir: String,
    state: tauri::State<'_, AppState>,
) -> Result<Delivery, AppError> {
    regenerate_saved_brief_inner(
        &id,
        Path::new(&target_dir),
        &state.form,
        &state.store,
        super::today(),
    )
    .await
}

// ── Tests ────────────────────────────────────────────────────────────────────
