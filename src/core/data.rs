//! Core data structures for the pricing worksheet
//!
//! A [`Ledger`] is an ordered list of [`Row`]s that is never empty. Each row
//! carries a unit price and exactly [`POINTS`] quantity allocations.

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of allocation points every row distributes its quantities over
pub const POINTS: usize = 8;

/// Opaque row identity, stable for the lifetime of the row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh row identities
pub trait IdGenerator {
    fn next_id(&mut self) -> RowId;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> RowId {
        RowId(Uuid::new_v4().to_string())
    }
}

/// Monotonically increasing ids: `row-1`, `row-2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> RowId {
        self.next += 1;
        RowId(format!("row-{}", self.next))
    }
}

/// One line item
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub name: String,
    pub unit_price: f64,
    pub quantities: [f64; POINTS],
}

impl Row {
    /// A default row: empty name, zero price, zero quantities
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            name: String::new(),
            unit_price: 0.0,
            quantities: [0.0; POINTS],
        }
    }

    pub fn quantity_sum(&self) -> f64 {
        self.quantities.iter().sum()
    }

    /// Unit price times the sum of all quantities
    pub fn total(&self) -> f64 {
        self.unit_price * self.quantity_sum()
    }
}

/// An editable column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    UnitPrice,
    /// Zero-based allocation slot
    Quantity(usize),
}

impl FromStr for Field {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let key = s.trim();
        match key.to_ascii_lowercase().as_str() {
            "name" => return Ok(Field::Name),
            "unitprice" | "unit-price" | "unit_price" | "price" => return Ok(Field::UnitPrice),
            _ => {}
        }

        // q0..q7 address slots by zero-based index, p1..p8 by point number
        let slot = if let Some(rest) = key.strip_prefix(['q', 'Q']) {
            rest.parse::<usize>().ok()
        } else if let Some(rest) = key.strip_prefix(['p', 'P']) {
            rest.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
        } else {
            None
        };

        match slot {
            Some(i) if i < POINTS => Ok(Field::Quantity(i)),
            _ => Err(AppError::Input(format!(
                "unknown field '{}' (expected name, price, q0..q7 or p1..p8)",
                s
            ))),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::UnitPrice => f.write_str("unitPrice"),
            Field::Quantity(i) => write!(f, "q{}", i),
        }
    }
}

/// Coerce raw user input to a number.
///
/// Empty, non-numeric and non-finite input become 0. Negative numbers are
/// accepted as entered.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Ordered, never-empty collection of rows
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub(crate) rows: Vec<Row>,
}

impl Ledger {
    /// A ledger holding a single default row
    pub fn new(ids: &mut dyn IdGenerator) -> Self {
        Self {
            rows: vec![Row::new(ids.next_id())],
        }
    }

    /// Build a ledger from existing rows, restoring one default row if `rows` is empty
    pub fn from_rows(rows: Vec<Row>, ids: &mut dyn IdGenerator) -> Self {
        if rows.is_empty() {
            return Self::new(ids);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find_mut(&mut self, id: &RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| &r.id == id)
    }

    /// Resolve a row by full id or by its 1-based position in the grid
    pub fn resolve(&self, identifier: &str) -> Option<&Row> {
        let identifier = identifier.trim();
        if let Some(row) = self.rows.iter().find(|r| r.id.as_str() == identifier) {
            return Some(row);
        }
        identifier
            .trim_start_matches('#')
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.rows.get(i))
    }
}
