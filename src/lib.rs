//! Pricesheet - a pricing worksheet
//!
//! Line items carry a unit price and quantities across eight allocation
//! points. The library derives per-point sums, a base total and a fixed
//! markup/VAT cascade, and persists the worksheet as a JSON document in a
//! key-value store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod storage;
pub mod utils;
pub mod worksheet;

// Re-export core types for easier use
pub use crate::core::{
    data::{coerce_number, Field, IdGenerator, Ledger, Row, RowId, SequentialIds, UuidIds, POINTS},
    derive::{recompute, Totals, TotalsDisplay, MARKUP_RATE, VAT_RATE},
    traits::{Confirmation, FixedAnswer, KeyValueStore},
};
pub use storage::{FileStore, MemoryStore, STORAGE_KEY};
pub use utils::error::{AppError, AppResult};
pub use worksheet::Worksheet;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
