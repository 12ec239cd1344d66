pub mod add;
pub mod clear;
pub mod configure;
pub mod edit;
pub mod remove;
pub mod set;
pub mod show;

use crate::config::Config;
use crate::core::data::{RowId, UuidIds};
use crate::core::traits::KeyValueStore;
use crate::storage::FileStore;
use crate::utils::error::{AppError, AppResult};
use crate::worksheet::Worksheet;

/// Open the worksheet saved in the configured data directory
pub fn open_worksheet(config: &Config) -> AppResult<Worksheet<FileStore>> {
    let store = FileStore::new(&config.general.data_dir);
    tracing::debug!(dir = %store.dir().display(), "opening worksheet");
    Worksheet::open(store, Box::new(UuidIds))
}

/// Resolve a row id or 1-based row number, failing with a user-facing message
pub fn resolve_row<S: KeyValueStore>(sheet: &Worksheet<S>, identifier: &str) -> AppResult<RowId> {
    sheet
        .resolve(identifier)
        .ok_or_else(|| AppError::Input(format!("Row '{}' not found", identifier)))
}
