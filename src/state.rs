//! Application state managed by Tauri.
//!
//! [`AppState`] is registered with `tauri::Builder::manage` and accessed from
//! command handlers via `tauri::State<AppState>`.

use std::sync::RwLock;

use crate::archive::ArchiveBackend;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::form::BriefForm;
use crate::store::SnapshotStore;

/// Root application state.
///
/// The live form is the only mutable piece and sits behind a [`RwLock`];
/// the store and the archive are stateless handles.
#[derive(Debug)]
pub struct AppState {
    pub form: RwLock<BriefForm>,
    pub store: SnapshotStore,
    pub archive: ArchiveBackend,
}

impl AppState {
    /// Build state around `store`, restoring the last persisted brief.
    pub fn new(store: SnapshotStore, archive: ArchiveBackend) -> Self {
        let live = store.load_live();
        Self {
            form: RwLock::new(BriefForm::new(live)),
            store,
            archive,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, AppError> {
        let data_dir = cfg
            .data_dir()
            .ok_or_else(|| AppError::Config("no local data directory available".to_string()))?;
        let store = SnapshotStore::in_dir(&data_dir)?;
        let archive = ArchiveBackend::from_config(&cfg.archive)?;
        tracing::info!(
            store = %store.path().display(),
            archive = archive.is_enabled(),
            "application state ready"
        );
        Ok(Self::new(store, archive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::BriefData;
    use crate::config::StorageConfig;

    #[test]
    fn fresh_state_starts_from_default_brief() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = AppState::new(SnapshotStore::in_dir(dir.path()).expect("store"), ArchiveBackend::Disabled);
        let form = state.form.read().expect("read form lock");
        assert_eq!(form.data(), &BriefData::default());
    }

    #[test]
    fn state_restores_persisted_brief() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::in_dir(dir.path()).expect("store");
        let mut data = BriefData::default();
        data.general.client_brand = "7Ciel".to_string();
        store.save_live(&data).expect("save");

        let state = AppState::new(store, ArchiveBackend::Disabled);
        let form = state.form.read().expect("read form lock");
        assert_eq!(form.data().general.client_brand, "7Ciel");
    }

    #[test]
    fn from_config_uses_configured_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = AppConfig {
            storage: StorageConfig {
                data_dir: Some(dir.path().join("data")),
            },
            ..AppConfig::default()
        };
        let state = AppState::from_config(&cfg).expect("state");
        assert_eq!(state.store.path(), dir.path().join("data").join("storage.json"));
        assert!(!state.archive.is_enabled());
    }
}
