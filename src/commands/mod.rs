//! Tauri IPC command handlers.
//!
//! Sub-modules are grouped by concern:
//! - [`form`]: live brief edits and reset
//! - [`file`]: JSON import / export
//! - [`generate`]: PDF generation and delivery
//! - [`library`]: saved-brief library
//! - [`archive`]: archive listing
//!
//! Every handler is an `_inner` function (testable without Tauri) wrapped by
//! a `#[tauri::command]` entry point that only exists with the `desktop`
//! feature.

pub mod archive;
pub mod file;
pub mod form;
pub mod generate;
pub mod library;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::brief::BriefData;
use crate::error::AppError;
use crate::form::BriefForm;
use crate::store::SnapshotStore;

pub(crate) fn read_form(lock: &RwLock<BriefForm>) -> Result<RwLockReadGuard<'_, BriefForm>, AppError> {
    lock.read()
        .map_err(|_| AppError::Store("form state lock poisoned".to_string()))
}

pub(crate) fn write_form(
    lock: &RwLock<BriefForm>,
) -> Result<RwLockWriteGuard<'_, BriefForm>, AppError> {
    lock.write()
        .map_err(|_| AppError::Store("form state lock poisoned".to_string()))
}

/// Snapshot the live value after a successful mutation. A failed write is
/// logged and otherwise ignored; the in-memory edit stands.
pub(crate) fn persist(store: &SnapshotStore, data: &BriefData) {
    if let Err(e) = store.save_live(data) {
        tracing::warn!(error = %e, "live brief not persisted");
    }
}

/// Today's date for file names and the document footer.
#[cfg(feature = "desktop")]
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
