//! Various error types
//!

use thiserror::Error;

use crate::network::UnitId;

/// Error type returned by the fallible operations of `NeuraNetwork`
#[derive(Clone, Debug, PartialEq, Error)]
pub enum NeuraNetworkErr {
    /// A vector (network input or expected output) did not have the length of its layer
    #[error("dimensions mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A unit id that isn't part of the network, or of the layer it was expected in
    #[error("unknown unit reference: {0}")]
    UnknownUnitReference(UnitId),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

impl NeuraNetworkErr {
    pub(crate) fn check_dimensions(expected: usize, actual: usize) -> Result<(), Self> {
        if expected != actual {
            return Err(Self::DimensionMismatch { expected, actual });
        }

        Ok(())
    }
}
