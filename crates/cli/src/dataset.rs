//! Dataset loading: the built-in Selemo data, or a TOML file via `--dataset`.
//!
//! Validation always runs at load time, so every later engine call operates
//! on a known-good dataset.

use std::path::Path;

use selemo_projection::{ProjectionConfig, ProjectionError};

use crate::exit_codes::{EXIT_DATASET_INVALID, EXIT_DATASET_PARSE, EXIT_IO_ERROR};
use crate::CliError;

pub fn load(path: Option<&Path>) -> Result<ProjectionConfig, CliError> {
    match path {
        None => {
            let config = ProjectionConfig::builtin();
            config.validate().map_err(validation_error)?;
            Ok(config)
        }
        Some(path) => {
            let input = std::fs::read_to_string(path).map_err(|e| CliError {
                code: EXIT_IO_ERROR,
                message: format!("cannot read {}: {e}", path.display()),
                hint: None,
            })?;
            ProjectionConfig::from_toml(&input).map_err(|e| match e {
                ProjectionError::ConfigParse(_) => CliError {
                    code: EXIT_DATASET_PARSE,
                    message: e.to_string(),
                    hint: Some("datasets are TOML with [[projects]] and [[scenarios]] tables".into()),
                },
                other => validation_error(other),
            })
        }
    }
}

fn validation_error(err: ProjectionError) -> CliError {
    CliError {
        code: EXIT_DATASET_INVALID,
        message: err.to_string(),
        hint: None,
    }
}
