pub mod derivable;
pub mod err;
pub mod gradient_solver;
pub mod network;
pub mod train;

mod utils;

pub mod prelude {
    pub use crate::derivable::activation::*;
    pub use crate::derivable::input::WeightedSum;
    pub use crate::derivable::{NeuraDerivable, NeuraInputSum};
    pub use crate::err::NeuraNetworkErr;
    pub use crate::gradient_solver::{NeuraBackprop, NeuraGradientSolver};
    pub use crate::network::{
        build_network, ConnectionId, NeuraConnection, NeuraLayerPosition, NeuraNetwork,
        NeuraNetworkBuilder, NeuraUnit, UnitId,
    };
    pub use crate::train::{NeuraTrainer, TrainingResult};
}
