//! `stockpilot-analytics`
//!
//! **Responsibility:** Demand analytics over inventory snapshots.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not mutate product state.
//! - It consumes snapshots handed in by callers and returns plain numeric
//!   results, never domain events.
//! - All non-determinism lives behind the injected noise source, so a
//!   zero-variance source makes every output reproducible.

pub mod forecast;
pub mod noise;
pub mod recommend;
pub mod series;

pub use forecast::{DEFAULT_FORECAST_HORIZON_DAYS, ForecastEngine};
pub use noise::{GaussianNoise, NoiseSource, ZeroNoise};
pub use recommend::{RecommendationEngine, RestockAdvice};
pub use series::{SeriesPoint, build_series};
