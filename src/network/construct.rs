use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::{debug, trace};

use super::*;

/// Builds a fully-connected layered network: every unit of a hidden or output layer receives one connection
/// from each unit of the previous layer, plus one connection from the bias unit.
///
/// Weights are drawn uniformly from `weight_range`, using the random number generator given to `build`.
#[derive(Clone, Debug)]
pub struct NeuraNetworkBuilder {
    pub input_count: usize,
    pub hidden_layers: Vec<usize>,
    pub output_count: usize,

    /// Activation used by every hidden and output unit; defaults to `Sigmoid { slope: 1.0 }`
    pub activation: Box<dyn NeuraDerivable>,
    pub input_sum: Box<dyn NeuraInputSum>,

    /// Defaults to `(-1.0, 1.0)`
    pub weight_range: (f64, f64),

    pub backprop: NeuraBackprop,
}

impl NeuraNetworkBuilder {
    pub fn new(input_count: usize, output_count: usize) -> Self {
        Self {
            input_count,
            hidden_layers: Vec::new(),
            output_count,
            activation: Box::new(crate::derivable::activation::Sigmoid::default()),
            input_sum: Box::new(WeightedSum),
            weight_range: (-1.0, 1.0),
            backprop: NeuraBackprop::default(),
        }
    }

    /// Appends a hidden layer of `size` units
    pub fn hidden(mut self, size: usize) -> Self {
        self.hidden_layers.push(size);
        self
    }

    pub fn activation(mut self, activation: impl NeuraDerivable + 'static) -> Self {
        self.activation = Box::new(activation);
        self
    }

    pub fn input_sum(mut self, input_sum: impl NeuraInputSum + 'static) -> Self {
        self.input_sum = Box::new(input_sum);
        self
    }

    pub fn weight_range(mut self, low: f64, high: f64) -> Self {
        assert!(
            low <= high,
            "Invalid weight range: {} is greater than {}",
            low,
            high
        );
        self.weight_range = (low, high);
        self
    }

    pub fn backprop(mut self, backprop: NeuraBackprop) -> Self {
        self.backprop = backprop;
        self
    }

    pub fn build(&self, rng: &mut impl Rng) -> NeuraNetwork {
        let distribution = Uniform::new_inclusive(self.weight_range.0, self.weight_range.1);

        let mut network = NeuraNetwork::new();
        network.backprop = self.backprop;

        for _ in 0..self.input_count {
            network.add_input_unit();
        }

        let mut previous = network.input_layer.clone();

        for (layer, &size) in self.hidden_layers.iter().enumerate() {
            network.hidden_layers.push(Vec::with_capacity(size));

            for _ in 0..size {
                let id = network.push_unit(
                    NeuraLayerPosition::Hidden(layer),
                    self.activation.clone(),
                    self.input_sum.clone(),
                );
                network.hidden_layers[layer].push(id);
                Self::link_to_previous(&mut network, id, &previous, &distribution, rng);
            }

            previous = network.hidden_layers[layer].clone();
        }

        for _ in 0..self.output_count {
            let id = network.add_output_unit(self.activation.clone(), self.input_sum.clone());
            Self::link_to_previous(&mut network, id, &previous, &distribution, rng);
        }

        debug!(
            inputs = self.input_count,
            hidden = ?self.hidden_layers,
            outputs = self.output_count,
            connections = network.connection_count(),
            "Constructed network"
        );

        network
    }

    fn link_to_previous(
        network: &mut NeuraNetwork,
        unit: UnitId,
        previous: &[UnitId],
        distribution: &Uniform<f64>,
        rng: &mut impl Rng,
    ) {
        let bias = network.bias;

        for &from in previous.iter().chain(std::iter::once(&bias)) {
            let weight = distribution.sample(rng);
            trace!(from = %from, to = %unit, weight, "Initialized connection weight");

            network.link(NeuraConnection::new(from, unit, weight));
        }
    }
}

/// Builds a network with a single hidden layer, where every hidden and output unit uses `activation`
/// and weights are initialized uniformly within `[-1, 1]`.
pub fn build_network(
    input_count: usize,
    hidden_count: usize,
    output_count: usize,
    activation: impl NeuraDerivable + 'static,
    rng: &mut impl Rng,
) -> NeuraNetwork {
    NeuraNetworkBuilder::new(input_count, output_count)
        .hidden(hidden_count)
        .activation(activation)
        .build(rng)
}
