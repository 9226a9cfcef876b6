use proptest::prelude::*;

use selemo_projection::{
    cash_flow, monthly_extraction, price_comparison, PricingScenario, ProjectPhase,
    ProjectionConfig,
};

const HORIZON: u32 = 12;

fn config_strategy() -> impl Strategy<Value = ProjectionConfig> {
    prop::collection::vec((1.0f64..1e8, 1u32..=HORIZON), 1..4).prop_map(|specs| {
        let projects: Vec<ProjectPhase> = specs
            .into_iter()
            .enumerate()
            .map(|(i, (operational_cost, duration_months))| ProjectPhase {
                name: format!("phase{i}"),
                operational_cost,
                duration_months,
            })
            .collect();
        let total_operational_cost = projects.iter().map(|p| p.operational_cost).sum();
        ProjectionConfig {
            name: "generated".into(),
            horizon_months: HORIZON,
            total_operational_cost,
            projects,
            scenarios: Vec::new(),
            cost_breakdown: Vec::new(),
        }
    })
}

fn scenario_strategy() -> impl Strategy<Value = PricingScenario> {
    (0.01f64..1e4, 0.0f64..5e8, 1.0f64..1e6).prop_map(
        |(price_per_unit, total_revenue, annual_extraction)| PricingScenario {
            name: "Buyer".into(),
            price_per_unit,
            total_revenue,
            annual_extraction,
            extraction_cycles: 2,
        },
    )
}

fn valid_input() -> impl Strategy<Value = (ProjectionConfig, PricingScenario)> {
    (config_strategy(), scenario_strategy()).prop_map(|(mut config, scenario)| {
        config.scenarios.push(scenario.clone());
        (config, scenario)
    })
}

proptest! {
    #[test]
    fn generated_datasets_validate((config, _scenario) in valid_input()) {
        config.validate().unwrap();
    }

    #[test]
    fn volume_conserved((config, scenario) in valid_input()) {
        let rows = monthly_extraction(&scenario, &config);
        prop_assert_eq!(rows.len(), HORIZON as usize);

        let total: f64 = rows.iter().map(|r| r.total).sum();
        let tolerance = scenario.annual_extraction * 1e-6;
        prop_assert!(
            (total - scenario.annual_extraction).abs() <= tolerance,
            "series sums to {}, scenario volume {}",
            total,
            scenario.annual_extraction
        );
    }

    #[test]
    fn revenue_and_cost_conserved((config, scenario) in valid_input()) {
        let rows = cash_flow(&scenario, &config);

        let revenue: f64 = rows.iter().map(|r| r.revenue).sum();
        let revenue_tolerance = (scenario.total_revenue * 1e-6).max(1e-6);
        prop_assert!((revenue - scenario.total_revenue).abs() <= revenue_tolerance);

        let cost: f64 = rows.iter().map(|r| r.operational_cost).sum();
        let cost_tolerance = config.total_operational_cost * 1e-6;
        prop_assert!((cost - config.total_operational_cost).abs() <= cost_tolerance);
    }

    #[test]
    fn nothing_contributed_after_duration((config, scenario) in valid_input()) {
        let rows = monthly_extraction(&scenario, &config);
        for project in &config.projects {
            for row in &rows {
                let volume = row.per_project[&project.name];
                if row.month > project.duration_months {
                    prop_assert_eq!(volume, 0.0);
                } else {
                    prop_assert!(volume > 0.0);
                }
            }
        }

        let flows = cash_flow(&scenario, &config);
        let last_window = config.projects.iter().map(|p| p.duration_months).max().unwrap();
        for row in &flows {
            prop_assert_eq!(row.active, row.month <= last_window);
            if row.month > last_window {
                prop_assert_eq!(row.revenue, 0.0);
                prop_assert_eq!(row.operational_cost, 0.0);
            }
        }
    }

    #[test]
    fn series_fields_non_negative((config, scenario) in valid_input()) {
        for row in monthly_extraction(&scenario, &config) {
            prop_assert!(row.total >= 0.0);
            prop_assert!(row.per_project.values().all(|&v| v >= 0.0));
        }
        for row in cash_flow(&scenario, &config) {
            prop_assert!(row.revenue >= 0.0);
            prop_assert!(row.operational_cost >= 0.0);
        }
    }

    #[test]
    fn cost_series_ignores_scenario(
        (config, scenario) in valid_input(),
        other in scenario_strategy()
    ) {
        let a = cash_flow(&scenario, &config);
        let b = cash_flow(&other, &config);
        for (left, right) in a.iter().zip(&b) {
            prop_assert_eq!(left.operational_cost, right.operational_cost);
            prop_assert_eq!(left.active, right.active);
        }
    }

    #[test]
    fn margins_defined_unless_revenue_is_zero((config, _scenario) in valid_input()) {
        let rows = price_comparison(&config.scenarios, &config);
        for (row, scenario) in rows.iter().zip(&config.scenarios) {
            if scenario.total_revenue == 0.0 {
                prop_assert!(row.profit_margin_pct.is_none());
            } else {
                let margin = row.profit_margin_pct.unwrap();
                prop_assert!(margin.is_finite());
            }
        }
    }
}
