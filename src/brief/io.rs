//! JSON import and export of a brief.
//!
//! # Export
//! The live brief is written as pretty-printed JSON to
//! `brief-<projectName|untitled>.json`, first to `<target>.tmp` in the same
//! directory and then renamed over the target, so a failed write never
//! leaves a truncated file behind.
//!
//! # Import
//! The file is parsed and then checked by [`super::schema::validate`].
//! Malformed JSON and shape mismatches both surface as
//! [`AppError::SchemaValidation`]; the caller's live value is never touched
//! on failure because nothing is returned.

use std::path::{Path, PathBuf};

use super::schema::validate;
use super::types::BriefData;
use crate::error::AppError;

/// Serialize `data` as pretty-printed JSON.
pub fn to_json(data: &BriefData) -> Result<String, AppError> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Io(format!("cannot serialize brief: {e}")))
}

/// Parse and validate brief JSON text.
pub fn from_json(text: &str) -> Result<BriefData, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::SchemaValidation(format!("not valid JSON: {e}")))?;
    Ok(validate(&value)?)
}

/// File name used when exporting `data`.
///
/// Path separators in the project name are replaced by `-` so the name can
/// never escape the chosen directory.
pub fn export_file_name(data: &BriefData) -> String {
    let project = data.project_name().unwrap_or("untitled");
    let safe: String = project
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("brief-{safe}.json")
}

/// Export `data` into `dir`, returning the full path of the written file.
pub fn export_to_dir(data: &BriefData, dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(export_file_name(data));
    let json = to_json(data)?;
    write_atomic(&path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "brief exported");
    Ok(path)
}

/// Read and validate a brief file.
pub fn import_from_path(path: &Path) -> Result<BriefData, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("cannot read {}: {e}", path.display())))?;
    from_json(&text)
}

/// Write `bytes` to `path` through a sibling temp file and a rename.
///
/// On any error the temp file is removed and `path` is left unchanged.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Err(e) = std::fs::write(&tmp_path, bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(AppError::Io(format!(
            "cannot write {}: {e}",
            tmp_path.display()
        )));
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        AppError::Io(format!("rename to {} failed: {e}", path.display()))
    })
}
