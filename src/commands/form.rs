//! Live brief command handlers.
//!
//! Each successful mutation returns the full updated brief and persists it
//! to the snapshot store.

use std::sync::RwLock;

use crate::brief::BriefData;
use crate::error::AppError;
use crate::form::{BriefForm, FieldEdit, ListField};
use crate::store::SnapshotStore;

#[cfg(feature = "desktop")]
use crate::state::AppState;

use super::{persist, read_form, write_form};

// ── get_brief ────────────────────────────────────────────────────────────────

pub fn get_brief_inner(form_lock: &RwLock<BriefForm>) -> Result<BriefData, AppError> {
    Ok(read_form(form_lock)?.data().clone())
}

// ── update_field ─────────────────────────────────────────────────────────────

/// Apply one edit. A rejected edit leaves both the live value and the
/// store untouched.
pub fn update_field_inner(
    edit: FieldEdit,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<BriefData, AppError> {
    let mut form = write_form(form_lock)?;
    form.apply(edit)?;
    persist(store, form.data());
    Ok(form.data().clone())
}

// ── append_list_item / remove_list_item ──────────────────────────────────────

pub fn append_list_item_inner(
    field: ListField,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<BriefData, AppError> {
    let mut form = write_form(form_lock)?;
    form.append_list_item(field);
    persist(store, form.data());
    Ok(form.data().clone())
}

/// Removing the last element, or an index past the end, is silently
/// ignored; the current value is returned either way.
pub fn remove_list_item_inner(
    field: ListField,
    index: usize,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<BriefData, AppError> {
    let mut form = write_form(form_lock)?;
    if form.remove_list_item(field, index) {
        persist(store, form.data());
    }
    Ok(form.data().clone())
}

// ── reset_brief ──────────────────────────────────────────────────────────────

pub fn reset_brief_inner(
    confirmed: bool,
    form_lock: &RwLock<BriefForm>,
    store: &SnapshotStore,
) -> Result<BriefData, AppError> {
    if !confirmed {
        return Err(AppError::ConfirmationRequired);
    }
    let mut form = write_form(form_lock)?;
    form.reset_to_default();
    persist(store, form.data());
    tracing::info!("brief reset to defaults");
    Ok(form.data().clone())
}

// ── Tauri command wrappers ───────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn get_brief(state: tauri::State<'_, AppState>) -> Result<BriefData, AppError> {
    get_brief_inner(&state.form)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn update_field(
    edit: FieldEdit,
    state: tauri::State<'_, AppState>,
) -> Result<BriefData, AppError> {
    update_field_inner(edit, &state.form, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn append_list_item(
    field: ListField,
    state: tauri::State<'_, AppState>,
) -> Result<BriefData, AppError> {
    append_list_item_inner(field, &state.form, &state.store)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn remove_list_item(
    field: ListField,
    index: usize,
    state: tauri::State<'_, AppState>,
) -> Result<BriefData, AppError> {
    remove_list_item_inner(field, index, &state.form, &state.store)
}

/// Clear the form. The frontend must ask the user first and pass
/// `confirmed = true`.
#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn reset_brief(
    confirmed: bool,
    state: tauri::State<'_, AppState>,
) -> Result<BriefData, AppError> {
    reset_brief_inner(confirmed, &state.form, &state.store)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::form::{CopyEdit, GeneralEdit, ListItem};

    fn client(name: &str) -> FieldEdit {
        FieldEdit::General(GeneralEdit::ClientBrand(name.to_string()))
    }

    #[test]
    fn update_field_persists_the_new_value() {
        let (_dir, state) = test_support::state();
        let data = update_field_inner(client("7Ciel"), &state.form, &state.store).expect("update");
        assert_eq!(data.general.client_brand, "7Ciel");
        assert_eq!(state.store.load_live().general.client_brand, "7Ciel");
    }

    #[test]
    fn rejected_edit_changes_nothing() {
        let (_dir, state) = test_support::state();
        update_field_inner(client("7Ciel"), &state.form, &state.store).expect("update");

        let bad = FieldEdit::Copy(CopyEdit::Headline(ListItem {
            index: 4,
            value: "x".to_string(),
        }));
        let err = update_field_inner(bad, &state.form, &state.store).unwrap_err();
        assert!(matches!(err, AppError::InvalidEdit(_)));

        let live = get_brief_inner(&state.form).expect("get");
        assert_eq!(live.copy.headlines, vec![String::new()]);
        assert_eq!(state.store.load_live(), live);
    }

    #[test]
    fn append_then_remove_list_items() {
        let (_dir, state) = test_support::state();
        let data = append_list_item_inner(ListField::Ctas, &state.form, &state.store).expect("append");
        assert_eq!(data.copy.ctas.len(), 2);
        let data =
            remove_list_item_inner(ListField::Ctas, 0, &state.form, &state.store).expect("remove");
        assert_eq!(data.copy.ctas.len(), 1);
        let data =
            remove_list_item_inner(ListField::Ctas, 0, &state.form, &state.store).expect("remove");
        assert_eq!(data.copy.ctas, vec![String::new()]);
        assert_eq!(state.store.load_live().copy.ctas.len(), 1);
    }

    #[test]
    fn reset_requires_confirmation() {
        let (_dir, state) = test_support::state();
        update_field_inner(client("7Ciel"), &state.form, &state.store).expect("update");

        let err = reset_brief_inner(false, &state.form, &state.store).unwrap_err();
        assert!(matches!(err, AppError::ConfirmationRequired));
        assert_eq!(get_brief_inner(&state.form).expect("get").general.client_brand, "7Ciel");

        let data = reset_brief_inner(true, &state.form, &state.store).expect("reset");
        assert_eq!(data, BriefData::default());
        assert_eq!(state.store.load_live(), BriefData::default());
    }
}
