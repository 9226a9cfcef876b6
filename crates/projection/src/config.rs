use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Absolute tolerance when checking the declared total against the
/// per-project sum. Currency datasets are entered to the cent.
const COST_TOLERANCE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Top-level dataset
// ---------------------------------------------------------------------------

/// A complete projection dataset: the pricing-scenario set, the project
/// constants, and the optional cost-category breakdown. Fixed at startup;
/// the engine never mutates it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionConfig {
    pub name: String,
    /// Number of projected months.
    #[serde(default = "default_horizon")]
    pub horizon_months: u32,
    /// Must equal the sum of per-project operational costs.
    pub total_operational_cost: f64,
    pub projects: Vec<ProjectPhase>,
    pub scenarios: Vec<PricingScenario>,
    #[serde(default)]
    pub cost_breakdown: Vec<CostCategory>,
}

fn default_horizon() -> u32 {
    12
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// One extraction phase with its own operational cost and duration window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPhase {
    pub name: String,
    pub operational_cost: f64,
    /// Active months, starting at month 1.
    pub duration_months: u32,
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// One supplier's pricing assumptions: unit price, total realizable revenue,
/// and the extractable volume under that offtake agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingScenario {
    pub name: String,
    pub price_per_unit: f64,
    pub total_revenue: f64,
    /// Extractable volume in m³. An external input, not derived.
    pub annual_extraction: f64,
    /// Permit-renewal cycles. Carried for display, unused by the arithmetic.
    pub extraction_cycles: u32,
}

// ---------------------------------------------------------------------------
// Cost breakdown
// ---------------------------------------------------------------------------

/// One cost category of the operational budget, in R millions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCategory {
    pub name: String,
    pub amount_millions: f64,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ProjectionConfig {
    pub fn from_toml(input: &str) -> Result<Self, ProjectionError> {
        let config: ProjectionConfig =
            toml::from_str(input).map_err(|e| ProjectionError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast startup validation. A dataset that passes makes every
    /// engine operation a total function: no per-call error paths remain.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.horizon_months < 1 {
            return Err(ProjectionError::ConfigValidation(
                "horizon_months must be at least 1".into(),
            ));
        }

        if !(self.total_operational_cost > 0.0) {
            return Err(ProjectionError::ConfigValidation(format!(
                "total_operational_cost must be positive, got {}",
                self.total_operational_cost
            )));
        }

        if self.projects.is_empty() {
            return Err(ProjectionError::ConfigValidation(
                "at least 1 project is required".into(),
            ));
        }

        for (i, project) in self.projects.iter().enumerate() {
            if self.projects[..i].iter().any(|p| p.name == project.name) {
                return Err(ProjectionError::DuplicateProject(project.name.clone()));
            }
            if !(project.operational_cost > 0.0) {
                return Err(ProjectionError::ConfigValidation(format!(
                    "project '{}': operational_cost must be positive, got {}",
                    project.name, project.operational_cost
                )));
            }
            if project.duration_months < 1 || project.duration_months > self.horizon_months {
                return Err(ProjectionError::BadDuration {
                    project: project.name.clone(),
                    months: project.duration_months,
                    horizon: self.horizon_months,
                });
            }
        }

        let sum: f64 = self.projects.iter().map(|p| p.operational_cost).sum();
        if (sum - self.total_operational_cost).abs() > COST_TOLERANCE {
            return Err(ProjectionError::CostMismatch {
                declared: self.total_operational_cost,
                sum,
            });
        }

        if self.scenarios.is_empty() {
            return Err(ProjectionError::ConfigValidation(
                "at least 1 scenario is required".into(),
            ));
        }

        for (i, scenario) in self.scenarios.iter().enumerate() {
            if self.scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(ProjectionError::DuplicateScenario(scenario.name.clone()));
            }
            if !(scenario.price_per_unit > 0.0) {
                return Err(ProjectionError::ConfigValidation(format!(
                    "scenario '{}': price_per_unit must be positive, got {}",
                    scenario.name, scenario.price_per_unit
                )));
            }
            if !(scenario.annual_extraction > 0.0) {
                return Err(ProjectionError::ConfigValidation(format!(
                    "scenario '{}': annual_extraction must be positive, got {}",
                    scenario.name, scenario.annual_extraction
                )));
            }
            // Zero revenue is allowed: it signals the undefined-margin case,
            // which the engine reports explicitly instead of dividing by it.
            if scenario.total_revenue < 0.0 {
                return Err(ProjectionError::ConfigValidation(format!(
                    "scenario '{}': total_revenue must not be negative, got {}",
                    scenario.name, scenario.total_revenue
                )));
            }
        }

        for category in &self.cost_breakdown {
            if category.amount_millions < 0.0 {
                return Err(ProjectionError::ConfigValidation(format!(
                    "cost category '{}': amount_millions must not be negative, got {}",
                    category.name, category.amount_millions
                )));
            }
        }

        Ok(())
    }

    /// Look up a scenario by name.
    pub fn scenario(&self, name: &str) -> Option<&PricingScenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// The built-in Selemo dataset: four supplier pricing scenarios against
    /// the Terraform 1 / Terraform 2 extraction phases.
    ///
    /// The source memorandum quotes a headline total of R140.63M; the
    /// declared total here is the exact per-project sum, which the
    /// validation invariant requires.
    pub fn builtin() -> Self {
        Self {
            name: "Selemo X".into(),
            horizon_months: 12,
            total_operational_cost: 140_632_837.0,
            projects: vec![
                ProjectPhase {
                    name: "terraform1".into(),
                    operational_cost: 35_206_181.0,
                    duration_months: 2,
                },
                ProjectPhase {
                    name: "terraform2".into(),
                    operational_cost: 105_426_656.0,
                    duration_months: 5,
                },
            ],
            scenarios: vec![
                PricingScenario {
                    name: "Step Building Supplies".into(),
                    price_per_unit: 732.57,
                    total_revenue: 426_867_037.0,
                    annual_extraction: 583_145.86,
                    extraction_cycles: 2,
                },
                PricingScenario {
                    name: "Inframat".into(),
                    price_per_unit: 650.0,
                    total_revenue: 379_044_809.0,
                    annual_extraction: 583_145.86,
                    extraction_cycles: 2,
                },
                PricingScenario {
                    name: "Bulkmat".into(),
                    price_per_unit: 598.0,
                    total_revenue: 348_305_960.0,
                    annual_extraction: 583_145.86,
                    extraction_cycles: 2,
                },
                PricingScenario {
                    name: "Platinum Aggregates".into(),
                    price_per_unit: 90.0,
                    total_revenue: 91_845_563.0,
                    annual_extraction: 583_145.86,
                    extraction_cycles: 2,
                },
            ],
            cost_breakdown: vec![
                CostCategory { name: "Site Preparation".into(), amount_millions: 0.1 },
                CostCategory { name: "Labour".into(), amount_millions: 2.88 },
                CostCategory { name: "Equipment & Maintenance".into(), amount_millions: 7.8 },
                CostCategory { name: "Transportation".into(), amount_millions: 1.2 },
                CostCategory { name: "Environmental".into(), amount_millions: 0.18 },
                CostCategory { name: "Permits".into(), amount_millions: 0.002 },
                CostCategory { name: "Contingency".into(), amount_millions: 1.02 },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Test Dataset"
total_operational_cost = 1000.0

[[projects]]
name = "phase1"
operational_cost = 400.0
duration_months = 2

[[projects]]
name = "phase2"
operational_cost = 600.0
duration_months = 5

[[scenarios]]
name = "Buyer A"
price_per_unit = 50.0
total_revenue = 5000.0
annual_extraction = 100.0
extraction_cycles = 2
"#;

    #[test]
    fn parse_valid_dataset() {
        let config = ProjectionConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Test Dataset");
        assert_eq!(config.horizon_months, 12, "horizon defaults to 12");
        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.scenarios.len(), 1);
        assert!(config.cost_breakdown.is_empty());
        assert_eq!(config.scenario("Buyer A").unwrap().price_per_unit, 50.0);
        assert!(config.scenario("Buyer Z").is_none());
    }

    #[test]
    fn parse_explicit_horizon_and_breakdown() {
        let input = format!(
            r#"horizon_months = 6
{VALID}
[[cost_breakdown]]
name = "Labour"
amount_millions = 2.88
"#
        );
        let config = ProjectionConfig::from_toml(&input).unwrap();
        assert_eq!(config.horizon_months, 6);
        assert_eq!(config.cost_breakdown.len(), 1);
        assert_eq!(config.cost_breakdown[0].name, "Labour");
    }

    #[test]
    fn builtin_dataset_is_valid() {
        let config = ProjectionConfig::builtin();
        config.validate().unwrap();
        assert_eq!(config.scenarios.len(), 4);
        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.horizon_months, 12);
    }

    #[test]
    fn builtin_total_matches_project_sum() {
        let config = ProjectionConfig::builtin();
        let sum: f64 = config.projects.iter().map(|p| p.operational_cost).sum();
        assert_eq!(config.total_operational_cost, sum);
    }

    #[test]
    fn reject_cost_mismatch() {
        let input = VALID.replace("total_operational_cost = 1000.0", "total_operational_cost = 999.0");
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ProjectionError::CostMismatch { .. }), "got {err}");
    }

    #[test]
    fn accept_cost_within_tolerance() {
        let input = VALID.replace("total_operational_cost = 1000.0", "total_operational_cost = 1000.005");
        ProjectionConfig::from_toml(&input).unwrap();
    }

    #[test]
    fn reject_zero_total_cost() {
        let input = r#"
name = "Bad"
total_operational_cost = 0.0
projects = []
scenarios = []
"#;
        let err = ProjectionConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("total_operational_cost"));
    }

    #[test]
    fn reject_zero_duration() {
        let input = VALID.replace("duration_months = 2", "duration_months = 0");
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ProjectionError::BadDuration { months: 0, .. }), "got {err}");
    }

    #[test]
    fn reject_duration_beyond_horizon() {
        let input = VALID.replace("duration_months = 5", "duration_months = 13");
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(
            matches!(err, ProjectionError::BadDuration { months: 13, horizon: 12, .. }),
            "got {err}"
        );
    }

    #[test]
    fn reject_duplicate_project() {
        let input = VALID.replace(r#"name = "phase2""#, r#"name = "phase1""#);
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ProjectionError::DuplicateProject(ref n) if n == "phase1"));
    }

    #[test]
    fn reject_duplicate_scenario() {
        let input = format!(
            r#"{VALID}
[[scenarios]]
name = "Buyer A"
price_per_unit = 60.0
total_revenue = 6000.0
annual_extraction = 100.0
extraction_cycles = 2
"#
        );
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ProjectionError::DuplicateScenario(ref n) if n == "Buyer A"));
    }

    #[test]
    fn reject_negative_revenue() {
        let input = VALID.replace("total_revenue = 5000.0", "total_revenue = -1.0");
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("total_revenue"));
    }

    #[test]
    fn accept_zero_revenue() {
        // Zero revenue is the degenerate-margin case, not a config error.
        let input = VALID.replace("total_revenue = 5000.0", "total_revenue = 0.0");
        ProjectionConfig::from_toml(&input).unwrap();
    }

    #[test]
    fn reject_negative_cost_category() {
        let input = format!(
            r#"{VALID}
[[cost_breakdown]]
name = "Labour"
amount_millions = -0.5
"#
        );
        let err = ProjectionConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("Labour"));
    }

    #[test]
    fn reject_empty_scenarios() {
        let input = r#"
name = "Bad"
total_operational_cost = 400.0
scenarios = []

[[projects]]
name = "phase1"
operational_cost = 400.0
duration_months = 2
"#;
        let err = ProjectionConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("scenario"));
    }

    #[test]
    fn reject_malformed_toml() {
        let err = ProjectionConfig::from_toml("name = [unclosed").unwrap_err();
        assert!(matches!(err, ProjectionError::ConfigParse(_)));
    }
}
