//! Time-series reconstruction from the sparse sales-history map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockpilot_core::{DayKey, DomainResult};

/// One reconstructed point of a product's sales series.
///
/// Derived value: it lives for the duration of one forecast or
/// recommendation call and is never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Day of year (1-366).
    pub day: u16,
    /// Units sold that day.
    pub quantity: u32,
}

/// Rebuild the ordered sales series from the history map.
///
/// One point per map entry, ascending by day, quantities untouched. A key
/// that fails the `Day-<n>` grammar is an error rather than a dropped point:
/// silently losing history would skew every downstream forecast.
pub fn build_series(historical_sales: &HashMap<String, u32>) -> DomainResult<Vec<SeriesPoint>> {
    let mut series = Vec::with_capacity(historical_sales.len());
    for (key, &quantity) in historical_sales {
        let day_key: DayKey = key.parse()?;
        series.push(SeriesPoint {
            day: day_key.day_of_year(),
            quantity,
        });
    }
    // Day keys are unique per product, so this order is total.
    series.sort_by_key(|point| point.day);
    Ok(series)
}
