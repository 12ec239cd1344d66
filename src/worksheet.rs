//! The worksheet: ledger, store and id source owned together.
//!
//! Every mutation goes through here so the saved state always matches what is
//! on screen. Totals are never cached; [`Worksheet::totals`] derives them from
//! the current ledger on each call.

use crate::core::data::{Field, IdGenerator, Ledger, RowId};
use crate::core::derive::{recompute, Totals};
use crate::core::traits::{Confirmation, KeyValueStore};
use crate::storage;
use crate::utils::error::AppResult;

pub const CLEAR_PROMPT: &str = "Clear all rows from the worksheet?";

pub struct Worksheet<S: KeyValueStore> {
    ledger: Ledger,
    store: S,
    ids: Box<dyn IdGenerator>,
}

impl<S: KeyValueStore> Worksheet<S> {
    /// Open the worksheet saved in `store`, or start with a single empty row
    pub fn open(store: S, mut ids: Box<dyn IdGenerator>) -> AppResult<Self> {
        let ledger = match storage::load(&store, ids.as_mut())? {
            Some(ledger) => {
                tracing::info!(rows = ledger.len(), "loaded saved worksheet");
                ledger
            }
            None => Ledger::new(ids.as_mut()),
        };

        Ok(Self { ledger, store, ids })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn totals(&self) -> Totals {
        recompute(&self.ledger)
    }

    /// Resolve an id or 1-based row number to a row id
    pub fn resolve(&self, identifier: &str) -> Option<RowId> {
        self.ledger.resolve(identifier).map(|row| row.id.clone())
    }

    pub fn add_row(&mut self) -> AppResult<RowId> {
        let id = self.ledger.add_row(self.ids.as_mut());
        tracing::debug!(%id, "row added");
        self.persist()?;
        Ok(id)
    }

    /// Remove a row; returns false if it did not exist
    pub fn remove_row(&mut self, id: &RowId) -> AppResult<bool> {
        let removed = self.ledger.remove_row(id, self.ids.as_mut());
        tracing::debug!(%id, removed, "row removal");
        self.persist()?;
        Ok(removed)
    }

    /// Apply one live field edit; returns false if the row did not exist
    pub fn edit(&mut self, id: &RowId, field: Field, raw: &str) -> AppResult<bool> {
        let updated = self.ledger.update_field(id, field, raw);
        tracing::debug!(%id, %field, updated, "field edit");
        self.persist()?;
        Ok(updated)
    }

    /// Apply several edits to one row and save once
    pub fn edit_many(&mut self, id: &RowId, edits: &[(Field, String)]) -> AppResult<bool> {
        let mut updated = true;
        for (field, raw) in edits {
            updated &= self.ledger.update_field(id, *field, raw);
        }
        self.persist()?;
        Ok(updated)
    }

    /// Replace every row with a single empty row, if the user agrees
    pub fn clear_all(&mut self, confirm: &mut dyn Confirmation) -> AppResult<bool> {
        if !confirm.confirm(CLEAR_PROMPT)? {
            tracing::debug!("clear declined");
            return Ok(false);
        }

        self.ledger.reset(self.ids.as_mut());
        tracing::info!("worksheet cleared");
        self.persist()?;
        Ok(true)
    }

    fn persist(&mut self) -> AppResult<()> {
        storage::save(&mut self.store, &self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Row, SequentialIds, POINTS};
    use crate::core::traits::FixedAnswer;
    use crate::storage::{FileStore, MemoryStore, STORAGE_KEY};

    fn fresh() -> Worksheet<MemoryStore> {
        Worksheet::open(MemoryStore::new(), Box::new(SequentialIds::new())).unwrap()
    }

    fn reopen(sheet: &Worksheet<MemoryStore>) -> Worksheet<MemoryStore> {
        Worksheet::open(sheet.store().clone(), Box::new(SequentialIds::new())).unwrap()
    }

    #[test]
    fn test_open_empty_store_gives_default_row() {
        let sheet = fresh();
        assert_eq!(sheet.ledger().rows(), &[Row::new(RowId::new("row-1"))]);
        assert!(sheet.store().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_open_malformed_store_gives_default_row() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{\"rows\": 3}").unwrap();

        let sheet = Worksheet::open(store, Box::new(SequentialIds::new())).unwrap();
        assert_eq!(sheet.ledger().len(), 1);
        assert_eq!(sheet.totals().grand_total, 0.0);
    }

    #[test]
    fn test_open_non_utf8_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path_for(STORAGE_KEY), [0xff, 0xfe, b'[', b']']).unwrap();

        let mut sheet = Worksheet::open(store, Box::new(SequentialIds::new())).unwrap();
        assert_eq!(sheet.ledger().rows(), &[Row::new(RowId::new("row-1"))]);

        // clearing must still work so the bad file can be replaced
        assert!(sheet.clear_all(&mut FixedAnswer(true)).unwrap());
        let saved = std::fs::read_to_string(sheet.store().path_for(STORAGE_KEY)).unwrap();
        assert!(saved.starts_with('['));
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut sheet = fresh();
        let first = sheet.resolve("1").unwrap();
        sheet.edit(&first, Field::UnitPrice, "100").unwrap();
        sheet.edit(&first, Field::Quantity(0), "1").unwrap();
        assert_eq!(reopen(&sheet).ledger(), sheet.ledger());

        let second = sheet.add_row().unwrap();
        assert_eq!(reopen(&sheet).ledger().len(), 2);

        sheet.remove_row(&second).unwrap();
        let reopened = reopen(&sheet);
        assert_eq!(reopened.ledger(), sheet.ledger());
        assert!((reopened.totals().grand_total - 144.45).abs() < 1e-9);
    }

    #[test]
    fn test_edit_many_applies_all_fields() {
        let mut sheet = fresh();
        let id = sheet.resolve("1").unwrap();
        let edits = vec![
            (Field::Name, "Tiles".to_string()),
            (Field::UnitPrice, "50".to_string()),
            (Field::Quantity(0), "2".to_string()),
        ];
        assert!(sheet.edit_many(&id, &edits).unwrap());

        let reopened = reopen(&sheet);
        let row = &reopened.ledger().rows()[0];
        assert_eq!(row.name, "Tiles");
        assert_eq!(row.total(), 100.0);
    }

    #[test]
    fn test_edit_unknown_row_changes_nothing() {
        let mut sheet = fresh();
        let before = sheet.ledger().clone();
        assert!(!sheet.edit(&RowId::new("ghost"), Field::UnitPrice, "9").unwrap());
        assert_eq!(sheet.ledger(), &before);
    }

    #[test]
    fn test_removing_last_row_keeps_one_default_row() {
        let mut sheet = fresh();
        let only = sheet.resolve("1").unwrap();
        sheet.edit(&only, Field::UnitPrice, "25").unwrap();

        assert!(sheet.remove_row(&only).unwrap());
        assert_eq!(sheet.ledger().len(), 1);
        assert_eq!(sheet.ledger().rows()[0].quantities, [0.0; POINTS]);
        assert_eq!(sheet.totals().base_total, 0.0);
        assert_eq!(reopen(&sheet).ledger().len(), 1);
    }

    #[test]
    fn test_declined_clear_changes_nothing() {
        let mut sheet = fresh();
        sheet.add_row().unwrap();
        let before = sheet.ledger().clone();

        assert!(!sheet.clear_all(&mut FixedAnswer(false)).unwrap());
        assert_eq!(sheet.ledger(), &before);
    }

    #[test]
    fn test_confirmed_clear_resets_and_persists() {
        let mut sheet = fresh();
        sheet.add_row().unwrap();
        sheet.add_row().unwrap();

        assert!(sheet.clear_all(&mut FixedAnswer(true)).unwrap());
        assert_eq!(sheet.ledger().len(), 1);
        assert_eq!(reopen(&sheet).ledger(), sheet.ledger());
    }

    #[test]
    fn test_clear_asks_before_acting() {
        struct Recorder(Vec<String>);
        impl Confirmation for Recorder {
            fn confirm(&mut self, message: &str) -> AppResult<bool> {
                self.0.push(message.to_string());
                Ok(false)
            }
        }

        let mut sheet = fresh();
        let mut recorder = Recorder(Vec::new());
        sheet.clear_all(&mut recorder).unwrap();
        assert_eq!(recorder.0, vec![CLEAR_PROMPT.to_string()]);
    }
}
