//! Ledger mutations
//!
//! None of these recompute totals; callers run
//! [`recompute`](crate::core::derive::recompute) after a batch of edits.

use crate::core::data::{coerce_number, Field, IdGenerator, Ledger, Row, RowId};

impl Ledger {
    /// Append a default row and return its id
    pub fn add_row(&mut self, ids: &mut dyn IdGenerator) -> RowId {
        let row = Row::new(ids.next_id());
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    /// Remove the row with `id`. Returns false if no such row exists.
    ///
    /// Removing the last row leaves a fresh default row in its place.
    pub fn remove_row(&mut self, id: &RowId, ids: &mut dyn IdGenerator) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| &r.id != id);
        let removed = self.rows.len() != before;

        if self.rows.is_empty() {
            self.rows.push(Row::new(ids.next_id()));
        }
        removed
    }

    /// Apply raw input to one field of a row. Returns false if no such row exists.
    pub fn update_field(&mut self, id: &RowId, field: Field, raw: &str) -> bool {
        let Some(row) = self.find_mut(id) else {
            return false;
        };

        match field {
            Field::Name => row.name = raw.to_string(),
            Field::UnitPrice => row.unit_price = coerce_number(raw),
            Field::Quantity(i) => {
                if let Some(slot) = row.quantities.get_mut(i) {
                    *slot = coerce_number(raw);
                }
            }
        }
        true
    }

    /// Replace every row with a single default row
    pub fn reset(&mut self, ids: &mut dyn IdGenerator) {
        self.rows = vec![Row::new(ids.next_id())];
    }
}

#[cfg(test)]
mod tests {
    use crate::core::data::{Field, Ledger, Row, RowId, SequentialIds, POINTS};
    use crate::core::derive::recompute;

    #[test]
    fn test_add_row_appends_default_row() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let id = ledger.add_row(&mut ids);

        assert_eq!(id, RowId::new("row-2"));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.rows()[1], Row::new(id));
    }

    #[test]
    fn test_remove_row_by_identity() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let second = ledger.add_row(&mut ids);
        let third = ledger.add_row(&mut ids);

        assert!(ledger.remove_row(&second, &mut ids));
        let remaining: Vec<_> = ledger.rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(remaining, vec![RowId::new("row-1"), third]);
    }

    #[test]
    fn test_remove_missing_row_is_noop() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let before = ledger.clone();

        assert!(!ledger.remove_row(&RowId::new("nope"), &mut ids));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_removing_only_row_resets_to_default() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let only = ledger.rows()[0].id.clone();
        ledger.update_field(&only, Field::UnitPrice, "100");
        ledger.update_field(&only, Field::Quantity(0), "4");

        assert!(ledger.remove_row(&only, &mut ids));
        assert_eq!(ledger.len(), 1);

        let row = &ledger.rows()[0];
        assert_ne!(row.id, only);
        assert_eq!(row.unit_price, 0.0);
        assert_eq!(row.quantities, [0.0; POINTS]);

        let totals = recompute(&ledger);
        assert_eq!(totals.base_total, 0.0);
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_update_field_coerces_numbers() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let id = ledger.rows()[0].id.clone();

        assert!(ledger.update_field(&id, Field::Name, "  Widget "));
        assert!(ledger.update_field(&id, Field::UnitPrice, "12.5"));
        assert!(ledger.update_field(&id, Field::Quantity(2), "abc"));
        assert!(ledger.update_field(&id, Field::Quantity(3), "-2"));

        let row = &ledger.rows()[0];
        assert_eq!(row.name, "  Widget ");
        assert_eq!(row.unit_price, 12.5);
        assert_eq!(row.quantities[2], 0.0);
        assert_eq!(row.quantities[3], -2.0);
    }

    #[test]
    fn test_update_missing_row_is_noop() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        let before = ledger.clone();

        assert!(!ledger.update_field(&RowId::new("ghost"), Field::UnitPrice, "5"));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_reset_leaves_single_default_row() {
        let mut ids = SequentialIds::new();
        let mut ledger = Ledger::new(&mut ids);
        ledger.add_row(&mut ids);
        ledger.add_row(&mut ids);

        ledger.reset(&mut ids);
        assert_eq!(ledger.rows(), &[Row::new(RowId::new("row-4"))]);
    }
}
