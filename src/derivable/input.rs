use super::NeuraInputSum;
use crate::network::{NeuraConnection, NeuraUnit};

/// Computes `Σ weight * source_output` over the incoming connections.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightedSum;

impl NeuraInputSum for WeightedSum {
    #[inline]
    fn collect(&self, connections: &[NeuraConnection], units: &[NeuraUnit]) -> f64 {
        connections
            .iter()
            .map(|connection| connection.weight() * units[connection.from().index()].output())
            .sum()
    }
}
