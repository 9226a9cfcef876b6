//! The projection operations: three derived series plus the whole-model run.
//!
//! Every operation is a pure total function over a validated dataset. Series
//! are recomputed from scratch on each call; nothing is cached.

use std::collections::BTreeMap;

use crate::config::{PricingScenario, ProjectPhase, ProjectionConfig};
use crate::error::ProjectionError;
use crate::model::{
    MonthlyCashFlowRow, MonthlyExtractionRow, PriceComparisonRow, ProjectionMeta,
    ProjectionResult,
};
use crate::summary;

/// Fraction of the total operational cost carried by one project.
fn cost_share(config: &ProjectionConfig, project: &ProjectPhase) -> f64 {
    project.operational_cost / config.total_operational_cost
}

/// Constant monthly extraction volume for one project: the scenario's total
/// volume allocated by operational-cost share, spread evenly across the
/// project's duration. The allocation is exhausted exactly at the end of the
/// duration window, never redistributed.
fn monthly_volume(
    scenario: &PricingScenario,
    config: &ProjectionConfig,
    project: &ProjectPhase,
) -> f64 {
    scenario.annual_extraction * cost_share(config, project) / project.duration_months as f64
}

/// Monthly revenue for one project, allocated and spread the same way as
/// extraction volume.
fn monthly_revenue(
    scenario: &PricingScenario,
    config: &ProjectionConfig,
    project: &ProjectPhase,
) -> f64 {
    scenario.total_revenue * cost_share(config, project) / project.duration_months as f64
}

/// Monthly operational cost for one project.
fn monthly_cost(project: &ProjectPhase) -> f64 {
    project.operational_cost / project.duration_months as f64
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Profit margin as a percentage of revenue, rounded to 2 decimals.
///
/// `None` when revenue is zero: the margin is undefined, and the caller gets
/// an explicit marker instead of a NaN that would leak into charts.
pub fn profit_margin_pct(total_revenue: f64, total_operational_cost: f64) -> Option<f64> {
    if total_revenue == 0.0 {
        return None;
    }
    Some(round2(
        (total_revenue - total_operational_cost) / total_revenue * 100.0,
    ))
}

/// Monthly extraction volume by project over the projection horizon.
pub fn monthly_extraction(
    scenario: &PricingScenario,
    config: &ProjectionConfig,
) -> Vec<MonthlyExtractionRow> {
    (1..=config.horizon_months)
        .map(|month| {
            let mut per_project = BTreeMap::new();
            let mut total = 0.0;
            for project in &config.projects {
                let volume = if month <= project.duration_months {
                    monthly_volume(scenario, config, project)
                } else {
                    0.0
                };
                total += volume;
                per_project.insert(project.name.clone(), volume);
            }
            MonthlyExtractionRow { month, per_project, total }
        })
        .collect()
}

/// Pricing figures side by side, one row per scenario in input order.
pub fn price_comparison(
    scenarios: &[PricingScenario],
    config: &ProjectionConfig,
) -> Vec<PriceComparisonRow> {
    scenarios
        .iter()
        .map(|scenario| PriceComparisonRow {
            name: scenario.name.clone(),
            price_per_unit: scenario.price_per_unit,
            total_revenue: scenario.total_revenue,
            profit_margin_pct: profit_margin_pct(
                scenario.total_revenue,
                config.total_operational_cost,
            ),
        })
        .collect()
}

/// Monthly revenue, cost, and net cash flow over the projection horizon.
pub fn cash_flow(
    scenario: &PricingScenario,
    config: &ProjectionConfig,
) -> Vec<MonthlyCashFlowRow> {
    (1..=config.horizon_months)
        .map(|month| {
            let mut revenue = 0.0;
            let mut operational_cost = 0.0;
            let mut active = false;
            for project in &config.projects {
                if month <= project.duration_months {
                    revenue += monthly_revenue(scenario, config, project);
                    operational_cost += monthly_cost(project);
                    active = true;
                }
            }
            MonthlyCashFlowRow {
                month,
                revenue,
                operational_cost,
                net_cash_flow: revenue - operational_cost,
                active,
            }
        })
        .collect()
}

/// Derive everything for the named scenario: summaries plus the three series,
/// stamped with engine version and run time.
pub fn run(config: &ProjectionConfig, scenario_name: &str) -> Result<ProjectionResult, ProjectionError> {
    let scenario = config
        .scenario(scenario_name)
        .ok_or_else(|| ProjectionError::UnknownScenario(scenario_name.to_string()))?;

    Ok(ProjectionResult {
        meta: ProjectionMeta {
            dataset_name: config.name.clone(),
            scenario: scenario.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        scenario_summary: summary::scenario_summary(scenario, config),
        project_summaries: summary::project_summaries(config),
        extraction: monthly_extraction(scenario, config),
        price_comparison: price_comparison(&config.scenarios, config),
        cash_flow: cash_flow(scenario, config),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
