use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_core::{ProductId, TransactionId};

/// Kind of a stock-affecting event.
///
/// Returns and write-offs are candidate future kinds; the ledger matches
/// exhaustively so adding one forces every decision site to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sale,
    Restock,
}

/// Immutable record of a single accepted stock-affecting event.
///
/// Created exactly once by the ledger when a command is accepted, then
/// append-only: the persistence collaborator stores it and the core never
/// reads it back (forecasting works off the denormalized `historical_sales`
/// map instead of the transaction log).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub product_id: ProductId,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Wire-facing transaction input from the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub product_id: ProductId,
    pub kind: TransactionKind,
    pub quantity: u32,
}

/// Fully-stamped command handed to the ledger.
///
/// `transaction_id` and `occurred_at` are owned by the persistence
/// collaborator; the ledger service stamps them onto the request before
/// calling into the pure core, which keeps `ledger::apply` deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransaction {
    pub transaction_id: TransactionId,
    pub product_id: ProductId,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

impl RecordTransaction {
    /// Stamp a wire request with a collaborator-owned id and timestamp.
    pub fn stamp(
        request: TransactionRequest,
        transaction_id: TransactionId,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            product_id: request.product_id,
            kind: request.kind,
            quantity: request.quantity,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Sale).unwrap(),
            "\"sale\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Restock).unwrap(),
            "\"restock\""
        );
    }

    #[test]
    fn unknown_kinds_are_rejected_at_the_boundary() {
        assert!(serde_json::from_str::<TransactionKind>("\"return\"").is_err());
        assert!(serde_json::from_str::<TransactionKind>("\"Sale\"").is_err());
    }
}
