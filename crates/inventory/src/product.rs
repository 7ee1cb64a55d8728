use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockpilot_core::ProductId;

/// Analytic snapshot of one stocked item.
///
/// This is the inbound shape handed over by the persistence collaborator and
/// the outbound shape handed back after a ledger mutation. Invariants:
/// `current_stock` never goes negative (the ledger rejects overdraws before
/// they happen), and `historical_sales` entries are only ever inserted or
/// increased, never removed or decreased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Units on hand.
    pub current_stock: u32,

    /// Informational restock threshold; reported, never enforced by the core.
    pub reorder_level: u32,

    /// Supplier replenishment delay in days.
    pub lead_time_days: u32,

    /// Sparse per-day sales history, keyed by `"Day-<n>"` (day of year).
    pub historical_sales: HashMap<String, u32>,

    /// Snapshot version, +1 per applied ledger mutation. Backs the
    /// optimistic-concurrency check at commit time.
    #[serde(default)]
    pub version: u64,
}

impl Product {
    /// Fresh snapshot with no sales history.
    pub fn new(id: ProductId, current_stock: u32, reorder_level: u32, lead_time_days: u32) -> Self {
        Self {
            id,
            current_stock,
            reorder_level,
            lead_time_days,
            historical_sales: HashMap::new(),
            version: 0,
        }
    }

    /// Stock at or below the informational reorder threshold.
    pub fn is_below_reorder_level(&self) -> bool {
        self.current_stock <= self.reorder_level
    }

    /// Number of days with recorded sales.
    pub fn recorded_days(&self) -> usize {
        self.historical_sales.len()
    }

    /// Total units sold across the recorded history.
    pub fn lifetime_units_sold(&self) -> u64 {
        self.historical_sales.values().map(|&q| u64::from(q)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(stock: u32, reorder_level: u32) -> Product {
        Product::new("P1001".parse().unwrap(), stock, reorder_level, 5)
    }

    #[test]
    fn reorder_threshold_is_inclusive() {
        assert!(test_product(10, 10).is_below_reorder_level());
        assert!(test_product(9, 10).is_below_reorder_level());
        assert!(!test_product(11, 10).is_below_reorder_level());
    }

    #[test]
    fn lifetime_units_sum_the_history() {
        let mut product = test_product(0, 0);
        product.historical_sales.insert("Day-1".to_string(), 10);
        product.historical_sales.insert("Day-2".to_string(), 12);
        assert_eq!(product.recorded_days(), 2);
        assert_eq!(product.lifetime_units_sold(), 22);
    }
}
