//! Core business logic layer
//!
//! This module contains the ledger data model, the derivation engine, the
//! ledger mutations and the traits that connect them to storage and the user.

pub mod data;
pub mod derive;
pub mod operations;
pub mod traits;
