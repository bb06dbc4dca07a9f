//! City-subsystem error type.

use thiserror::Error;

use cf_core::NodeId;

/// Errors produced by `cf-city` scenario construction.
///
/// Note that graph *queries* never return errors: passing an ID that does
/// not belong to the city is a caller contract violation and panics.
#[derive(Debug, Error)]
pub enum CityError {
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("no street connects {from} to {to}")]
    NoSuchStreet { from: NodeId, to: NodeId },
}

pub type CityResult<T> = Result<T, CityError>;
