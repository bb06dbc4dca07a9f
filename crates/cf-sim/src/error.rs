//! Simulation-subsystem error type.

use thiserror::Error;

use cf_city::CityError;

/// Errors produced by `cf-sim` — preset loading/validation, scenario
/// construction, and report output.
///
/// The routing layer itself never surfaces errors here: an unreachable
/// destination is an ordinary outcome expressed as an empty path.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid preset: {0}")]
    Preset(String),

    #[error("city construction failed: {0}")]
    City(#[from] CityError),

    #[error("preset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
