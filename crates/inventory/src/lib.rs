//! Inventory ledger module.
//!
//! This crate contains the business rules for stock mutation, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage engine).
//! The ledger is the sole mutator of product state; everything downstream of
//! it (forecasting, recommendations) is read-only.

pub mod ledger;
pub mod product;
pub mod store;
pub mod transaction;

pub use ledger::LedgerOutcome;
pub use product::Product;
pub use store::{InMemoryProductStore, LedgerService, ProductStore};
pub use transaction::{RecordTransaction, Transaction, TransactionKind, TransactionRequest};
