use dyn_clone::DynClone;

use crate::network::{NeuraConnection, NeuraUnit};

pub mod activation;
pub mod input;

/// An activation function, mapping the net input of a unit to its output.
///
/// Implementations are boxed inside of the units that use them, which is why this trait requires
/// `DynClone`: a `NeuraNetwork` can then be cloned without knowing the concrete activation types.
pub trait NeuraDerivable: DynClone + std::fmt::Debug {
    fn eval(&self, input: f64) -> f64;

    /// Should return the derivative of `self.eval(input)`
    fn derivate(&self, at: f64) -> f64;
}

dyn_clone::clone_trait_object!(NeuraDerivable);

/// Reduces the incoming connections of a unit into a single scalar (the net input of that unit).
pub trait NeuraInputSum: DynClone + std::fmt::Debug {
    /// `units` is the arena of the network that `connections` belong to;
    /// the source of a connection can be looked up with `units[connection.from().index()]`.
    fn collect(&self, connections: &[NeuraConnection], units: &[NeuraUnit]) -> f64;
}

dyn_clone::clone_trait_object!(NeuraInputSum);
