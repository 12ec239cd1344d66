//! Persistence bridge between a [`Ledger`] and a [`KeyValueStore`].
//!
//! The worksheet is stored under a single fixed key as a JSON array of
//! `{ id, name, unitPrice, quantities }` objects. Loading is forgiving: each
//! record is merged onto a default row, so missing or mistyped fields fall
//! back to their defaults and unknown fields are ignored.

use crate::core::data::{coerce_number, IdGenerator, Ledger, Row, RowId, POINTS};
use crate::core::traits::KeyValueStore;
use crate::utils::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key the worksheet lives under
pub const STORAGE_KEY: &str = "pricing-rows";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRow<'a> {
    id: &'a RowId,
    name: &'a str,
    unit_price: f64,
    quantities: &'a [f64; POINTS],
}

fn stored_rows(ledger: &Ledger) -> Vec<StoredRow<'_>> {
    ledger
        .rows()
        .iter()
        .map(|row| StoredRow {
            id: &row.id,
            name: &row.name,
            unit_price: row.unit_price,
            quantities: &row.quantities,
        })
        .collect()
}

/// Serialize the ledger to its persisted JSON form
pub fn to_json(ledger: &Ledger) -> AppResult<String> {
    serde_json::to_string(&stored_rows(ledger))
        .map_err(|e| AppError::Storage(format!("Failed to serialize worksheet: {}", e)))
}

/// Same document as [`to_json`], indented for reading
pub fn to_json_pretty(ledger: &Ledger) -> AppResult<String> {
    serde_json::to_string_pretty(&stored_rows(ledger))
        .map_err(|e| AppError::Storage(format!("Failed to serialize worksheet: {}", e)))
}

/// Write the ledger under [`STORAGE_KEY`], replacing whatever was there
pub fn save(store: &mut dyn KeyValueStore, ledger: &Ledger) -> AppResult<()> {
    let json = to_json(ledger)?;
    store.set(STORAGE_KEY, &json)?;
    tracing::debug!(rows = ledger.len(), bytes = json.len(), "worksheet saved");
    Ok(())
}

/// Read the ledger stored under [`STORAGE_KEY`].
///
/// Returns `None` when nothing is stored or the stored document is unusable;
/// the caller keeps its default ledger in that case.
pub fn load(store: &dyn KeyValueStore, ids: &mut dyn IdGenerator) -> AppResult<Option<Ledger>> {
    let Some(raw) = store.get(STORAGE_KEY)? else {
        tracing::debug!("no saved worksheet");
        return Ok(None);
    };
    Ok(parse(&raw, ids))
}

/// Parse a persisted document, or `None` if it is not a non-empty JSON array
pub fn parse(raw: &str, ids: &mut dyn IdGenerator) -> Option<Ledger> {
    if raw.trim().is_empty() {
        return None;
    }

    let document: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "saved worksheet is not valid JSON, using defaults");
            return None;
        }
    };

    let Value::Array(records) = document else {
        tracing::debug!("saved worksheet is not an array, using defaults");
        return None;
    };

    if records.is_empty() {
        tracing::debug!("saved worksheet has no rows, using defaults");
        return None;
    }

    let rows = records.iter().map(|record| merge_record(record, ids)).collect();
    Some(Ledger::from_rows(rows, ids))
}

fn merge_record(record: &Value, ids: &mut dyn IdGenerator) -> Row {
    let id = record
        .get("id")
        .and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(RowId::new(s.clone())),
            Value::Number(n) => Some(RowId::new(n.to_string())),
            _ => None,
        })
        .unwrap_or_else(|| ids.next_id());

    let mut row = Row::new(id);

    match record.get("name") {
        Some(Value::String(s)) => row.name = s.clone(),
        Some(Value::Number(n)) => row.name = n.to_string(),
        _ => {}
    }

    if let Some(price) = record.get("unitPrice") {
        row.unit_price = number_of(price);
    }

    if let Some(Value::Array(quantities)) = record.get("quantities") {
        for (slot, value) in row.quantities.iter_mut().zip(quantities.iter()) {
            *slot = number_of(value);
        }
    }

    row
}

fn number_of(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => coerce_number(s),
        _ => 0.0,
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        // undecodable content is as unusable as malformed JSON
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "saved worksheet is not valid UTF-8, using defaults"
                );
                Ok(None)
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }
}

/// In-memory store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
