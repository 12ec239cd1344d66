//! Core trait definitions for the worksheet
//!
//! These traits are the seams between the ledger logic and the outside
//! world: where the worksheet is persisted, and who answers yes/no questions.

use crate::utils::error::AppResult;

/// Durable key-value slot the worksheet is persisted into
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// Yes/no gate in front of destructive actions
pub trait Confirmation {
    fn confirm(&mut self, message: &str) -> AppResult<bool>;
}

/// Answers every question the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmation for FixedAnswer {
    fn confirm(&mut self, _message: &str) -> AppResult<bool> {
        Ok(self.0)
    }
}
