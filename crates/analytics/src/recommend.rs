//! Restock recommendation policy.

use serde::{Deserialize, Serialize};

use stockpilot_core::DomainResult;
use stockpilot_inventory::Product;

use crate::forecast::ForecastEngine;
use crate::noise::NoiseSource;
use crate::series::build_series;

/// Days of demand the recommendation looks ahead.
const RECOMMENDATION_HORIZON_DAYS: usize = 7;

/// Days of buffer held against demand variability.
const SAFETY_STOCK_DAYS: f64 = 14.0;

/// Days of lead coverage folded into the reorder point.
///
/// Fixed by policy; the per-product `lead_time_days` field is carried on the
/// snapshot but does not feed this calculation.
const LEAD_COVERAGE_DAYS: f64 = 7.0;

/// Proportional increase applied for fast-moving products.
const TREND_BUFFER: f64 = 1.2;

/// Structured restock recommendation.
///
/// `recommended_restock` is the scalar answer; the other two fields expose
/// the intermediate figures it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockAdvice {
    /// Rounded mean daily demand over the forecast horizon.
    pub predicted_demand: u32,
    /// Buffer held to absorb demand variability during replenishment.
    pub safety_stock: u32,
    /// Units to order now; zero when stock already covers the reorder point.
    pub recommended_restock: u32,
}

/// Derives restock quantities from the forecaster and a product snapshot.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<N: NoiseSource> {
    forecaster: ForecastEngine<N>,
}

impl<N: NoiseSource> RecommendationEngine<N> {
    pub fn new(forecaster: ForecastEngine<N>) -> Self {
        Self { forecaster }
    }

    /// Recommend a restock quantity for the product.
    ///
    /// Reads a self-consistent snapshot and mutates nothing. Sparse or empty
    /// history degrades to zero demand rather than erroring; a malformed
    /// history key does error, because dropping it would fake a low-demand
    /// product.
    pub fn recommend(&mut self, product: &Product, is_trending: bool) -> DomainResult<RestockAdvice> {
        let series = build_series(&product.historical_sales)?;
        let forecast = self
            .forecaster
            .forecast(&series, RECOMMENDATION_HORIZON_DAYS);
        let avg_daily_demand = mean(&forecast);

        let safety_stock = avg_daily_demand * SAFETY_STOCK_DAYS;
        let reorder_point = avg_daily_demand * LEAD_COVERAGE_DAYS + safety_stock;

        let mut recommended = (reorder_point - f64::from(product.current_stock))
            .round()
            .max(0.0);
        if is_trending {
            recommended = (recommended * TREND_BUFFER).round();
        }

        Ok(RestockAdvice {
            predicted_demand: avg_daily_demand.round() as u32,
            safety_stock: safety_stock.round() as u32,
            recommended_restock: recommended as u32,
        })
    }
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total: u64 = values.iter().map(|&v| u64::from(v)).sum();
    total as f64 / values.len() as f64
}
