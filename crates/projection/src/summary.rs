//! Derived scalar summaries layered on the dataset — the figures the
//! memorandum's summary panels display alongside the charts.

use ordered_float::OrderedFloat;

use crate::config::{PricingScenario, ProjectionConfig};
use crate::engine::{profit_margin_pct, round2};
use crate::model::{CostShare, Headline, ProjectSummary, ScenarioSummary};

/// Scalar figures for the selected scenario.
pub fn scenario_summary(scenario: &PricingScenario, config: &ProjectionConfig) -> ScenarioSummary {
    ScenarioSummary {
        name: scenario.name.clone(),
        price_per_unit: scenario.price_per_unit,
        total_revenue: scenario.total_revenue,
        profit_margin_pct: profit_margin_pct(scenario.total_revenue, config.total_operational_cost),
        net_return: scenario.total_revenue - config.total_operational_cost,
        extraction_cycles: scenario.extraction_cycles,
    }
}

/// Per-project duration, cost, and monthly cost. Scenario-independent.
pub fn project_summaries(config: &ProjectionConfig) -> Vec<ProjectSummary> {
    config
        .projects
        .iter()
        .map(|project| ProjectSummary {
            name: project.name.clone(),
            duration_months: project.duration_months,
            operational_cost: project.operational_cost,
            monthly_cost: project.operational_cost / project.duration_months as f64,
        })
        .collect()
}

/// The top-of-document figures: the best-revenue scenario with its revenue
/// and extractable volume, plus the total operational cost.
///
/// `None` only for a dataset with no scenarios, which validation rejects.
pub fn headline(config: &ProjectionConfig) -> Option<Headline> {
    let top = config
        .scenarios
        .iter()
        .max_by_key(|s| OrderedFloat(s.total_revenue))?;
    Some(Headline {
        top_scenario: top.name.clone(),
        top_revenue: top.total_revenue,
        total_extraction_volume: top.annual_extraction,
        total_operational_cost: config.total_operational_cost,
    })
}

/// Cost categories with their percentage share of the category total.
/// Empty when the dataset carries no breakdown.
pub fn cost_breakdown(config: &ProjectionConfig) -> Vec<CostShare> {
    let total: f64 = config.cost_breakdown.iter().map(|c| c.amount_millions).sum();
    config
        .cost_breakdown
        .iter()
        .map(|category| CostShare {
            name: category.name.clone(),
            amount_millions: category.amount_millions,
            share_pct: if total > 0.0 {
                round2(category.amount_millions / total * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
