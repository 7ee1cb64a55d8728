//! Stock ledger: applies sale/restock commands to product snapshots.
//!
//! `apply` is a pure function of its inputs. It never touches the snapshot it
//! was given; on success it returns a fresh snapshot carrying every mutation
//! (stock, history, version) as a single unit, and on failure it returns only
//! the error. All-or-nothing therefore holds by construction: there is no
//! partial state for a caller to observe or roll back.

use stockpilot_core::{DayKey, DomainError, DomainResult};

use crate::product::Product;
use crate::transaction::{RecordTransaction, Transaction, TransactionKind};

/// Result of an accepted ledger command: the updated snapshot plus the
/// transaction record the persistence collaborator must durably store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerOutcome {
    pub product: Product,
    pub transaction: Transaction,
}

/// Apply a stock-affecting command to a product snapshot.
///
/// - **Sale**: rejects overdraws with `InsufficientStock`; otherwise deducts
///   stock and rolls the quantity into the day bucket of `occurred_at`
///   (inserting the bucket if the product has not sold that day yet).
/// - **Restock**: adds stock; the sales history is untouched.
pub fn apply(product: &Product, command: &RecordTransaction) -> DomainResult<LedgerOutcome> {
    if command.quantity == 0 {
        return Err(DomainError::validation("quantity must be positive"));
    }
    if command.product_id != product.id {
        return Err(DomainError::invariant("product_id mismatch"));
    }

    let mut updated = product.clone();
    match command.kind {
        TransactionKind::Sale => {
            if command.quantity > updated.current_stock {
                return Err(DomainError::insufficient_stock(
                    command.quantity,
                    updated.current_stock,
                ));
            }
            updated.current_stock -= command.quantity;

            let day_key = DayKey::from_date(command.occurred_at).to_string();
            *updated.historical_sales.entry(day_key).or_insert(0) += command.quantity;
        }
        TransactionKind::Restock => {
            updated.current_stock += command.quantity;
        }
    }
    updated.version += 1;

    let transaction = Transaction {
        id: command.transaction_id,
        product_id: command.product_id.clone(),
        kind: command.kind,
        quantity: command.quantity,
        occurred_at: command.occurred_at,
    };

    Ok(LedgerOutcome {
        product: updated,
        transaction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use stockpilot_core::{ProductId, TransactionId};

    fn test_product_id() -> ProductId {
        "P1001".parse().unwrap()
    }

    fn test_product(stock: u32) -> Product {
        Product::new(test_product_id(), stock, 10, 5)
    }

    fn test_time() -> DateTime<Utc> {
        // 2025-02-01 is day of year 32.
        Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap()
    }

    fn command(kind: TransactionKind, quantity: u32) -> RecordTransaction {
        RecordTransaction {
            transaction_id: TransactionId::new(1),
            product_id: test_product_id(),
            kind,
            quantity,
            occurred_at: test_time(),
        }
    }

    #[test]
    fn sale_deducts_stock_and_opens_a_day_bucket() {
        let product = test_product(50);
        let outcome = apply(&product, &command(TransactionKind::Sale, 8)).unwrap();

        assert_eq!(outcome.product.current_stock, 42);
        assert_eq!(outcome.product.historical_sales.get("Day-32"), Some(&8));
        assert_eq!(outcome.product.version, product.version + 1);
    }

    #[test]
    fn sale_increments_an_existing_day_bucket() {
        let mut product = test_product(50);
        product.historical_sales.insert("Day-32".to_string(), 3);

        let outcome = apply(&product, &command(TransactionKind::Sale, 8)).unwrap();
        assert_eq!(outcome.product.historical_sales.get("Day-32"), Some(&11));
        assert_eq!(outcome.product.historical_sales.len(), 1);
    }

    #[test]
    fn sale_may_drain_stock_to_zero() {
        let product = test_product(8);
        let outcome = apply(&product, &command(TransactionKind::Sale, 8)).unwrap();
        assert_eq!(outcome.product.current_stock, 0);
    }

    #[test]
    fn overdraw_is_rejected_and_the_snapshot_is_untouched() {
        let product = test_product(5);
        let before = product.clone();

        let err = apply(&product, &command(TransactionKind::Sale, 6)).unwrap_err();
        match err {
            DomainError::InsufficientStock {
                requested,
                available,
            } => {
                assert_eq!(requested, 6);
                assert_eq!(available, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(product, before);
    }

    #[test]
    fn restock_adds_stock_and_leaves_history_alone() {
        let mut product = test_product(5);
        product.historical_sales.insert("Day-10".to_string(), 4);

        let outcome = apply(&product, &command(TransactionKind::Restock, 20)).unwrap();
        assert_eq!(outcome.product.current_stock, 25);
        assert_eq!(outcome.product.historical_sales, product.historical_sales);
        assert_eq!(outcome.product.version, product.version + 1);
    }

    #[test]
    fn zero_quantity_is_rejected_for_both_kinds() {
        let product = test_product(5);
        for kind in [TransactionKind::Sale, TransactionKind::Restock] {
            let err = apply(&product, &command(kind, 0)).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn mismatched_product_id_is_rejected() {
        let product = test_product(5);
        let mut cmd = command(TransactionKind::Sale, 1);
        cmd.product_id = "P2002".parse().unwrap();

        let err = apply(&product, &cmd).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn transaction_record_echoes_the_command() {
        let product = test_product(50);
        let cmd = RecordTransaction {
            transaction_id: TransactionId::new(99),
            product_id: test_product_id(),
            kind: TransactionKind::Sale,
            quantity: 8,
            occurred_at: test_time(),
        };

        let outcome = apply(&product, &cmd).unwrap();
        assert_eq!(outcome.transaction.id, TransactionId::new(99));
        assert_eq!(outcome.transaction.product_id, test_product_id());
        assert_eq!(outcome.transaction.kind, TransactionKind::Sale);
        assert_eq!(outcome.transaction.quantity, 8);
        assert_eq!(outcome.transaction.occurred_at, test_time());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a covered sale conserves units; stock drops by
            /// exactly what the history gains.
            #[test]
            fn covered_sales_conserve_units(
                stock in 0u32..100_000,
                quantity in 1u32..100_000,
            ) {
                prop_assume!(quantity <= stock);

                let product = test_product(stock);
                let outcome = apply(&product, &command(TransactionKind::Sale, quantity)).unwrap();

                prop_assert_eq!(outcome.product.current_stock, stock - quantity);
                prop_assert_eq!(
                    outcome.product.lifetime_units_sold(),
                    product.lifetime_units_sold() + u64::from(quantity)
                );
            }

            /// Property: an overdrawn sale always fails and never mutates.
            #[test]
            fn overdraws_always_fail(
                stock in 0u32..1000,
                excess in 1u32..1000,
            ) {
                let product = test_product(stock);
                let err = apply(&product, &command(TransactionKind::Sale, stock + excess)).unwrap_err();

                prop_assert!(
                    matches!(err, DomainError::InsufficientStock { .. }),
                    "expected InsufficientStock, got {:?}",
                    err
                );
            }

            /// Property: restocks add exactly the requested quantity and
            /// never touch the history.
            #[test]
            fn restocks_only_add_stock(
                stock in 0u32..100_000,
                quantity in 1u32..100_000,
            ) {
                let product = test_product(stock);
                let outcome = apply(&product, &command(TransactionKind::Restock, quantity)).unwrap();

                prop_assert_eq!(outcome.product.current_stock, stock + quantity);
                prop_assert_eq!(outcome.product.lifetime_units_sold(), 0);
            }

            /// Property: replaying any accepted sequence of commands, the
            /// final stock equals initial + restocked - sold, and history
            /// only ever grows.
            #[test]
            fn accepted_sequences_balance(
                initial in 0u32..1000,
                quantities in prop::collection::vec((0u8..2, 1u32..50), 1..20),
            ) {
                let mut product = test_product(initial);
                let mut sold: u64 = 0;
                let mut restocked: u64 = 0;

                for (discriminant, quantity) in quantities {
                    let kind = if discriminant == 0 {
                        TransactionKind::Sale
                    } else {
                        TransactionKind::Restock
                    };
                    let history_len = product.historical_sales.len();
                    match apply(&product, &command(kind, quantity)) {
                        Ok(outcome) => {
                            match kind {
                                TransactionKind::Sale => sold += u64::from(quantity),
                                TransactionKind::Restock => restocked += u64::from(quantity),
                            }
                            prop_assert!(outcome.product.historical_sales.len() >= history_len);
                            product = outcome.product;
                        }
                        Err(DomainError::InsufficientStock { .. }) => {
                            // Rejected sales must leave no trace; the next
                            // iteration keeps working off the same snapshot.
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                    }
                }

                prop_assert_eq!(
                    u64::from(product.current_stock),
                    u64::from(initial) + restocked - sold
                );
                prop_assert_eq!(product.lifetime_units_sold(), sold);
            }
        }
    }
}
