use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Monthly series
// ---------------------------------------------------------------------------

/// Extraction volume for one projected month, split by project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyExtractionRow {
    /// 1-based month index.
    pub month: u32,
    /// Project name → volume (m³) contributed this month. Zero once the
    /// project's duration window has elapsed.
    pub per_project: BTreeMap<String, f64>,
    pub total: f64,
}

/// Cash position for one projected month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashFlowRow {
    /// 1-based month index.
    pub month: u32,
    pub revenue: f64,
    pub operational_cost: f64,
    /// revenue − operational_cost; may be negative.
    pub net_cash_flow: f64,
    /// True while at least one project is inside its duration window.
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Scenario comparison
// ---------------------------------------------------------------------------

/// One scenario's pricing figures side by side, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceComparisonRow {
    pub name: String,
    pub price_per_unit: f64,
    pub total_revenue: f64,
    /// Rounded to 2 decimals. `None` when total_revenue is zero: the margin
    /// is undefined and display layers show a placeholder instead.
    pub profit_margin_pct: Option<f64>,
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Scalar figures for the selected scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub price_per_unit: f64,
    pub total_revenue: f64,
    pub profit_margin_pct: Option<f64>,
    /// total_revenue − total operational cost.
    pub net_return: f64,
    pub extraction_cycles: u32,
}

/// Scenario-independent figures for one project phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub duration_months: u32,
    pub operational_cost: f64,
    pub monthly_cost: f64,
}

/// The top-of-document figures: best-revenue scenario, combined volume,
/// total cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub top_scenario: String,
    pub top_revenue: f64,
    pub total_extraction_volume: f64,
    pub total_operational_cost: f64,
}

/// One cost category with its share of the category total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostShare {
    pub name: String,
    pub amount_millions: f64,
    /// Percentage of the category total, rounded to 2 decimals.
    pub share_pct: f64,
}

// ---------------------------------------------------------------------------
// Whole-model result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionMeta {
    pub dataset_name: String,
    pub scenario: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Everything derived for one selected scenario, recomputed from scratch on
/// every run and owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResult {
    pub meta: ProjectionMeta,
    pub scenario_summary: ScenarioSummary,
    pub project_summaries: Vec<ProjectSummary>,
    pub extraction: Vec<MonthlyExtractionRow>,
    pub price_comparison: Vec<PriceComparisonRow>,
    pub cash_flow: Vec<MonthlyCashFlowRow>,
}
