//! `selemo-projection` — Phased-extraction financial projection engine.
//!
//! Pure engine crate: takes a validated dataset (pricing scenarios + project
//! constants), returns derived monthly series and scalar summaries.
//! No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod summary;

pub use config::{CostCategory, PricingScenario, ProjectPhase, ProjectionConfig};
pub use engine::{cash_flow, monthly_extraction, price_comparison, profit_margin_pct, run};
pub use error::ProjectionError;
pub use model::{
    MonthlyCashFlowRow, MonthlyExtractionRow, PriceComparisonRow, ProjectionResult,
};
