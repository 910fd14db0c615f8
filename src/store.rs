//! Durable local persistence.
//!
//! [`SnapshotStore`] is a single JSON object on disk mapping well-known
//! keys to values:
//!
//! | key             | value                                  |
//! |-----------------|----------------------------------------|
//! | `brief-storage` | the live [`BriefData`]                 |
//! | `saved-briefs`  | flat array of [`SavedBrief`] records   |
//!
//! Every write rewrites the whole file atomically (temp file + rename).
//! The store is private to this process; concurrent writers from other
//! processes are not coordinated (last write wins).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::brief::io::write_atomic;
use crate::brief::BriefData;
use crate::error::AppError;

/// Key holding the live brief.
pub const LIVE_KEY: &str = "brief-storage";
/// Key holding the saved-brief library.
pub const SAVED_KEY: &str = "saved-briefs";
/// File name of the store inside its data directory.
pub const STORE_FILE: &str = "storage.json";

/// A named, immutable copy of a brief kept in the local library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBrief {
    /// Opaque unique identifier (UUID v4 string).
    pub id: String,
    pub client_name: String,
    pub project_name: String,
    /// Creation time in Unix milliseconds.
    pub timestamp: i64,
    pub data: BriefData,
}

/// File-backed key/value store for the live brief and the saved library.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store backed by `path` (the file need not exist yet).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in `dir`, creating the directory if needed.
    pub fn in_dir(dir: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::Store(format!("cannot create {}: {e}", dir.display())))?;
        Ok(Self::new(dir.join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── live value ───────────────────────────────────────────────────────────

    /// The last persisted live brief, or the canonical default.
    ///
    /// A corrupt or shape-invalid snapshot is logged and ignored rather than
    /// blocking start-up.
    pub fn load_live(&self) -> BriefData {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot unreadable, starting from default brief");
                return BriefData::default();
            }
        };
        match entries.get(LIVE_KEY) {
            None => BriefData::default(),
            Some(value) => match crate::brief::validate(value) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(error = %e, "persisted brief invalid, starting from default");
                    BriefData::default()
                }
            },
        }
    }

    pub fn save_live(&self, data: &BriefData) -> Result<(), AppError> {
        let value = serde_json::to_value(data)
            .map_err(|e| AppError::Store(format!("cannot serialize brief: {e}")))?;
        self.update(|entries| {
            entries.insert(LIVE_KEY.to_string(), value);
            Ok(())
        })
    }

    pub fn clear_live(&self) -> Result<(), AppError> {
        self.update(|entries| {
            entries.remove(LIVE_KEY);
            Ok(())
        })
    }

    // ── saved-brief library ──────────────────────────────────────────────────

    /// Every readable saved record in insertion order.
    ///
    /// A record that no longer passes validation is skipped with a warning
    /// but stays on disk; an unreadable library reads as empty.
    pub fn all(&self) -> Vec<SavedBrief> {
        let values = match self.read_entries().and_then(|mut e| take_saved(&mut e)) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "saved briefs unreadable, treating library as empty");
                return Vec::new();
            }
        };
        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let id = record_id(&value).unwrap_or("?").to_string();
                serde_json::from_value::<SavedBrief>(value)
                    .inspect_err(|e| {
                        tracing::warn!(index, id = %id, error = %e, "skipping unreadable saved brief");
                    })
                    .ok()
            })
            .collect()
    }

    /// Store a new immutable record and return it.
    pub fn save_brief(
        &self,
        client_name: &str,
        project_name: &str,
        data: &BriefData,
    ) -> Result<SavedBrief, AppError> {
        let record = SavedBrief {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.to_string(),
            project_name: project_name.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            data: data.clone(),
        };
        let value = serde_json::to_value(&record)
            .map_err(|e| AppError::Store(format!("cannot serialize saved brief: {e}")))?;
        self.update(|entries| {
            saved_mut(entries)?.push(value);
            Ok(())
        })?;
        tracing::info!(id = %record.id, client = %record.client_name, "brief saved to library");
        Ok(record)
    }

    pub fn get_by_id(&self, id: &str) -> Option<SavedBrief> {
        self.all().into_iter().find(|b| b.id == id)
    }

    /// Records whose client name matches `client_name`, ignoring case.
    pub fn get_by_client(&self, client_name: &str) -> Vec<SavedBrief> {
        let wanted = client_name.to_lowercase();
        self.all()
            .into_iter()
            .filter(|b| b.client_name.to_lowercase() == wanted)
            .collect()
    }

    /// Delete the record with `id`, readable or not. Returns
    /// [`AppError::NotFound`] when no such record exists.
    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        self.update(|entries| {
            let list = saved_mut(entries)?;
            let before = list.len();
            list.retain(|v| record_id(v) != Some(id));
            if list.len() == before {
                return Err(AppError::NotFound(format!("saved brief {id} not found")));
            }
            Ok(())
        })
    }

    /// Unique client names, sorted.
    pub fn clients(&self) -> Vec<String> {
        let mut names: Vec<String> = self.all().into_iter().map(|b| b.client_name).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Records grouped by client; each group newest first.
    pub fn group_by_client(&self) -> BTreeMap<String, Vec<SavedBrief>> {
        let mut grouped: BTreeMap<String, Vec<SavedBrief>> = BTreeMap::new();
        for brief in self.all() {
            grouped
                .entry(brief.client_name.clone())
                .or_default()
                .push(brief);
        }
        for briefs in grouped.values_mut() {
            briefs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        grouped
    }

    // ── file access ──────────────────────────────────────────────────────────

    /// File contents, `None` when the file does not exist yet.
    fn read_text(&self) -> Result<Option<String>, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Store(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>, AppError> {
        match self.read_text()? {
            None => Ok(Map::new()),
            Some(text) => parse_entries(&text),
        }
    }

    /// Read-modify-write of the whole file. Nothing is written when `f`
    /// fails or the file cannot be read. A file that is not valid JSON is
    /// moved aside to `<file>.corrupt` and replaced.
    fn update<T>(
        &self,
        f: impl FnOnce(&mut Map<String, Value>) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut entries = match self.read_text()? {
            None => Map::new(),
            Some(text) => match parse_entries(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    let backup = self.corrupt_path();
                    std::fs::rename(&self.path, &backup).map_err(|io| {
                        AppError::Store(format!("cannot move aside corrupt store: {io}"))
                    })?;
                    tracing::warn!(error = %e, backup = %backup.display(), "corrupt store file moved aside");
                    Map::new()
                }
            },
        };
        let out = f(&mut entries)?;
        let json = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| AppError::Store(format!("cannot serialize store: {e}")))?;
        write_atomic(&self.path, json.as_bytes())
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(out)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }
}

fn parse_entries(text: &str) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Store("store file is not a JSON object".to_string())),
        Err(e) => Err(AppError::Store(format!("cannot parse store file: {e}"))),
    }
}

/// The raw saved-brief records, removed from `entries`.
fn take_saved(entries: &mut Map<String, Value>) -> Result<Vec<Value>, AppError> {
    match entries.remove(SAVED_KEY) {
        None => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values),
        Some(_) => Err(AppError::Store(format!("{SAVED_KEY} is not an array"))),
    }
}

/// The raw saved-brief records, created empty when absent.
fn saved_mut(entries: &mut Map<String, Value>) -> Result<&mut Vec<Value>, AppError> {
    entries
        .entry(SAVED_KEY)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| AppError::Store(format!("{SAVED_KEY} is not an array")))
}

fn record_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}
