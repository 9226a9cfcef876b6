use std::fmt;

#[derive(Debug)]
pub enum ProjectionError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Dataset validation error (empty scenario set, bad horizon, etc.).
    ConfigValidation(String),
    /// Declared total operational cost does not match the per-project sum.
    CostMismatch { declared: f64, sum: f64 },
    /// Project duration outside 1..=horizon.
    BadDuration { project: String, months: u32, horizon: u32 },
    /// Two projects share the same name.
    DuplicateProject(String),
    /// Two scenarios share the same name.
    DuplicateScenario(String),
    /// Scenario name not present in the dataset.
    UnknownScenario(String),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "dataset parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "dataset validation error: {msg}"),
            Self::CostMismatch { declared, sum } => {
                write!(
                    f,
                    "total_operational_cost {declared} does not match per-project sum {sum}"
                )
            }
            Self::BadDuration { project, months, horizon } => {
                write!(
                    f,
                    "project '{project}': duration_months {months} outside 1..={horizon}"
                )
            }
            Self::DuplicateProject(name) => write!(f, "duplicate project name: '{name}'"),
            Self::DuplicateScenario(name) => write!(f, "duplicate scenario name: '{name}'"),
            Self::UnknownScenario(name) => write!(f, "unknown scenario: '{name}'"),
        }
    }
}

impl std::error::Error for ProjectionError {}
