mod backprop;
pub use backprop::NeuraBackprop;

use crate::{err::NeuraNetworkErr, network::NeuraNetwork};

/// Updates the weights of a network, given the expected output for the input of the last forward pass.
pub trait NeuraGradientSolver {
    fn apply(&self, network: &mut NeuraNetwork, expected: &[f64]) -> Result<(), NeuraNetworkErr>;
}
