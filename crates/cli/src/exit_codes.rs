//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-9     | dataset          | Dataset loading/validation codes         |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Dataset (3-9)
// =============================================================================

/// Dataset TOML could not be parsed.
pub const EXIT_DATASET_PARSE: u8 = 3;

/// Dataset parsed but failed validation (cost mismatch, bad duration, ...).
pub const EXIT_DATASET_INVALID: u8 = 4;

/// Requested scenario is not in the dataset.
pub const EXIT_UNKNOWN_SCENARIO: u8 = 5;

/// IO error reading the dataset or writing output.
pub const EXIT_IO_ERROR: u8 = 6;
