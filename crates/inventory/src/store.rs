//! Product store port and ledger service orchestration.
//!
//! The service implements the write pipeline for stock mutations:
//!
//! ```text
//! TransactionRequest
//!   ↓
//! 1. Load the product snapshot (persistence collaborator)
//!   ↓
//! 2. Stamp collaborator-owned transaction id + timestamp
//!   ↓
//! 3. ledger::apply (pure decision + mutation, all-or-nothing)
//!   ↓
//! 4. Commit at the loaded version (optimistic concurrency)
//!   ↓
//! 5. On Conflict: reload and retry, bounded
//! ```
//!
//! Two writers racing on the same product both pass step 3 against the same
//! snapshot; the commit check in step 4 makes exactly one of them win, so no
//! read-modify-write interleaving can lose an update. Writers on different
//! products never contend beyond the store's own locking.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use stockpilot_core::{DomainError, DomainResult, ExpectedVersion, ProductId, TransactionId};

use crate::ledger::{self, LedgerOutcome};
use crate::product::Product;
use crate::transaction::{RecordTransaction, Transaction, TransactionRequest};

/// Persistence collaborator port.
///
/// Implementations own durable storage, the transaction id sequence, and the
/// atomicity of `commit` for a single product. Cross-product coordination is
/// explicitly not required.
pub trait ProductStore: Send + Sync {
    /// Current snapshot of a product, or `NotFound`.
    fn load(&self, id: &ProductId) -> DomainResult<Product>;

    /// Atomically replace the product snapshot and append its transaction,
    /// provided the stored version still matches `expected`; `Conflict`
    /// otherwise, with nothing written.
    fn commit(&self, expected: ExpectedVersion, outcome: &LedgerOutcome) -> DomainResult<()>;

    /// Allocate the next transaction sequence number.
    fn next_transaction_id(&self) -> TransactionId;
}

/// In-memory store: reference implementation and test double.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ProductId, Product>>,
    log: RwLock<Vec<Transaction>>,
    sequence: AtomicU64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a product snapshot (no version check).
    pub fn insert(&self, product: Product) {
        let mut products = self.products.write().unwrap();
        products.insert(product.id.clone(), product);
    }

    /// Transactions accepted so far, in append order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.log.read().unwrap().clone()
    }
}

impl ProductStore for InMemoryProductStore {
    fn load(&self, id: &ProductId) -> DomainResult<Product> {
        let products = self.products.read().unwrap();
        products.get(id).cloned().ok_or_else(DomainError::not_found)
    }

    fn commit(&self, expected: ExpectedVersion, outcome: &LedgerOutcome) -> DomainResult<()> {
        let mut products = self.products.write().unwrap();
        let stored = products
            .get(&outcome.product.id)
            .ok_or_else(DomainError::not_found)?;
        expected.check(stored.version)?;

        products.insert(outcome.product.id.clone(), outcome.product.clone());
        self.log.write().unwrap().push(outcome.transaction.clone());
        Ok(())
    }

    fn next_transaction_id(&self) -> TransactionId {
        TransactionId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Drives the pure ledger against a product store.
///
/// The service is the seam between the request layer and the core: it owns
/// nothing but the store handle and a retry bound, and it holds no state
/// between calls.
pub struct LedgerService<S: ProductStore> {
    store: S,
    max_attempts: u32,
}

impl<S: ProductStore> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the commit retry bound (must be at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute a transaction request end to end.
    ///
    /// Domain failures (`Validation`, `InsufficientStock`, `NotFound`) abort
    /// immediately; only a lost commit race is retried, and only up to the
    /// configured bound before the `Conflict` is surfaced to the caller.
    pub fn execute(&self, request: &TransactionRequest) -> DomainResult<LedgerOutcome> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let product = self.store.load(&request.product_id)?;
            let command = RecordTransaction::stamp(
                request.clone(),
                self.store.next_transaction_id(),
                Utc::now(),
            );
            let outcome = ledger::apply(&product, &command)?;

            match self
                .store
                .commit(ExpectedVersion::Exact(product.version), &outcome)
            {
                Ok(()) => {
                    tracing::debug!(
                        product_id = %outcome.transaction.product_id,
                        transaction_id = %outcome.transaction.id,
                        kind = ?outcome.transaction.kind,
                        quantity = outcome.transaction.quantity,
                        stock = outcome.product.current_stock,
                        "transaction accepted"
                    );
                    return Ok(outcome);
                }
                Err(DomainError::Conflict(reason)) if attempt < self.max_attempts => {
                    tracing::debug!(
                        product_id = %request.product_id,
                        attempt,
                        %reason,
                        "commit lost the race, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}
