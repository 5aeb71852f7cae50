use super::*;
use crate::network::{NeuraUnit, UnitId};

/// Online backpropagation with momentum.
///
/// The error term of every unit is computed as if its activation was a sigmoid (`a * (1 - a)`),
/// regardless of the activation the unit was built with.
/// Networks whose hidden or output units use another activation will not descend along their gradient.
///
/// The output layer is updated first; the hidden layers are then updated from the last to the first,
/// each of them reading the weights of the following layer *after* those were updated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeuraBackprop {
    /// The weights `W` are updated as follows: `W += -learning_rate * gradient + momentum * previous_delta`.
    ///
    /// Defaults to `0.1`
    pub learning_rate: f64,

    /// Fraction of the previous update of a weight that is added to its next update, in `[0, 1)`.
    ///
    /// Defaults to `0.0`
    pub momentum: f64,
}

impl Default for NeuraBackprop {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            momentum: 0.0,
        }
    }
}

impl NeuraBackprop {
    pub fn new(learning_rate: f64, momentum: f64) -> Self {
        assert!(
            learning_rate > 0.0,
            "Learning rate must be positive, got {}",
            learning_rate
        );
        assert!(
            (0.0..1.0).contains(&momentum),
            "Momentum must be within [0, 1), got {}",
            momentum
        );

        Self {
            learning_rate,
            momentum,
        }
    }

    /// Updates every incoming connection of `unit`, given the error term `delta` of that unit:
    /// the partial derivative of the error according to the weight of a connection from `i` is `a_i * delta`.
    fn update_incoming(
        &self,
        units: &mut [NeuraUnit],
        unit: UnitId,
        delta: f64,
    ) -> Result<(), NeuraNetworkErr> {
        let sources = {
            let units: &[NeuraUnit] = units;
            units[unit.index()]
                .incoming()
                .iter()
                .map(|connection| output_of(units, connection.from()))
                .collect::<Result<Vec<_>, _>>()?
        };

        for (connection, source_output) in units[unit.index()].incoming_mut().iter_mut().zip(sources) {
            let partial_derivative = source_output * delta;
            let delta_weight = -self.learning_rate * partial_derivative;
            connection.apply_delta(delta_weight, self.momentum);
        }

        Ok(())
    }
}

fn output_of(units: &[NeuraUnit], id: UnitId) -> Result<f64, NeuraNetworkErr> {
    units
        .get(id.index())
        .map(NeuraUnit::output)
        .ok_or(NeuraNetworkErr::UnknownUnitReference(id))
}

impl NeuraGradientSolver for NeuraBackprop {
    fn apply(&self, network: &mut NeuraNetwork, expected: &[f64]) -> Result<(), NeuraNetworkErr> {
        NeuraNetworkErr::check_dimensions(network.output_layer.len(), expected.len())?;

        // Error terms of the units of the layers that were already updated, indexed by unit id
        let mut deltas: Vec<Option<f64>> = vec![None; network.units.len()];

        for (&id, &target) in network.output_layer.iter().zip(expected) {
            let output = output_of(&network.units, id)?;
            let delta = -(target - output) * output * (1.0 - output);

            deltas[id.index()] = Some(delta);
            self.update_incoming(&mut network.units, id, delta)?;
        }

        for layer in network.hidden_layers.iter().rev() {
            for &id in layer {
                let output = output_of(&network.units, id)?;

                let mut sum = 0.0;
                for &next in network.units[id.index()].outgoing() {
                    let next_delta = deltas
                        .get(next.index())
                        .copied()
                        .flatten()
                        .ok_or(NeuraNetworkErr::UnknownUnitReference(next))?;
                    let weight = network.units[next.index()]
                        .connection_from(id)
                        .ok_or(NeuraNetworkErr::UnknownUnitReference(id))?
                        .weight();

                    sum += next_delta * weight;
                }

                let delta = output * (1.0 - output) * sum;

                deltas[id.index()] = Some(delta);
                self.update_incoming(&mut network.units, id, delta)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        derivable::{activation::Sigmoid, input::WeightedSum},
        network::{build_network, NeuraNetworkBuilder},
    };

    /// 1 input, 1 hidden and 1 output unit, with hand-picked weights
    fn tiny_network() -> (NeuraNetwork, UnitId, UnitId, UnitId) {
        let mut network = NeuraNetwork::new();
        let input = network.add_input_unit();
        let hidden = network
            .add_hidden_unit(0, Box::new(Sigmoid::default()), Box::new(WeightedSum))
            .unwrap();
        let output = network.add_output_unit(Box::new(Sigmoid::default()), Box::new(WeightedSum));

        network.connect(input, hidden, 0.4).unwrap();
        network.connect(network.bias(), hidden, -0.2).unwrap();
        network.connect(hidden, output, 0.7).unwrap();
        network.connect(network.bias(), output, 0.1).unwrap();

        (network, input, hidden, output)
    }

    #[test]
    fn test_output_layer_update() {
        let (mut network, _, hidden, output) = tiny_network();
        let backprop = NeuraBackprop::new(0.5, 0.0);

        let a_k = network.eval(&[1.0]).unwrap()[0];
        let a_j = network.unit(hidden).unwrap().output();
        let expected = 1.0;

        backprop.apply(&mut network, &[expected]).unwrap();

        let delta_k = -(expected - a_k) * a_k * (1.0 - a_k);
        assert_relative_eq!(
            network.connection(hidden, output).unwrap().weight(),
            0.7 - 0.5 * a_j * delta_k
        );
        assert_relative_eq!(
            network.bias_connection(output).unwrap().weight(),
            0.1 - 0.5 * 1.0 * delta_k
        );
    }

    #[test]
    fn test_hidden_layer_reads_updated_weights() {
        let (mut network, input, hidden, output) = tiny_network();
        let backprop = NeuraBackprop::new(0.5, 0.0);

        let a_i = 0.8;
        let a_k = network.eval(&[a_i]).unwrap()[0];
        let a_j = network.unit(hidden).unwrap().output();
        let expected = 0.0;

        backprop.apply(&mut network, &[expected]).unwrap();

        let delta_k = -(expected - a_k) * a_k * (1.0 - a_k);
        // The weight between the hidden and the output unit was updated before the hidden layer pass
        let w_jk = 0.7 - 0.5 * a_j * delta_k;
        assert_relative_eq!(network.connection(hidden, output).unwrap().weight(), w_jk);

        let s_j = delta_k * w_jk;
        assert_relative_eq!(
            network.connection(input, hidden).unwrap().weight(),
            0.4 - 0.5 * a_j * (1.0 - a_j) * a_i * s_j
        );
        assert_relative_eq!(
            network.bias_connection(hidden).unwrap().weight(),
            -0.2 - 0.5 * a_j * (1.0 - a_j) * 1.0 * s_j
        );

        // Reading the weight from before the update would have yielded a different result
        let textbook = 0.4 - 0.5 * a_j * (1.0 - a_j) * a_i * delta_k * 0.7;
        assert!((network.connection(input, hidden).unwrap().weight() - textbook).abs() > 1e-12);
    }

    #[test]
    fn test_hidden_error_sums_every_output() {
        let mut network = NeuraNetwork::new();
        let input = network.add_input_unit();
        let hidden = network
            .add_hidden_unit(0, Box::new(Sigmoid::default()), Box::new(WeightedSum))
            .unwrap();
        let first = network.add_output_unit(Box::new(Sigmoid::default()), Box::new(WeightedSum));
        let second = network.add_output_unit(Box::new(Sigmoid::default()), Box::new(WeightedSum));

        network.connect(input, hidden, 0.4).unwrap();
        network.connect(network.bias(), hidden, -0.2).unwrap();
        // The bias connections come first, so the weights from the hidden unit aren't at index 0
        network.connect(network.bias(), second, 0.3).unwrap();
        network.connect(network.bias(), first, 0.1).unwrap();
        network.connect(hidden, second, -0.5).unwrap();
        network.connect(hidden, first, 0.7).unwrap();

        let backprop = NeuraBackprop::new(0.5, 0.0);
        let a_i = 0.6;
        let outputs = network.eval(&[a_i]).unwrap();
        let a_j = network.unit(hidden).unwrap().output();
        let expected = [1.0, 0.0];

        backprop.apply(&mut network, &expected).unwrap();

        let delta_first = -(expected[0] - outputs[0]) * outputs[0] * (1.0 - outputs[0]);
        let delta_second = -(expected[1] - outputs[1]) * outputs[1] * (1.0 - outputs[1]);
        let w_first = 0.7 - 0.5 * a_j * delta_first;
        let w_second = -0.5 - 0.5 * a_j * delta_second;
        assert_relative_eq!(network.connection(hidden, first).unwrap().weight(), w_first);
        assert_relative_eq!(network.connection(hidden, second).unwrap().weight(), w_second);

        let s_j = delta_first * w_first + delta_second * w_second;
        assert_relative_eq!(
            network.connection(input, hidden).unwrap().weight(),
            0.4 - 0.5 * a_j * (1.0 - a_j) * a_i * s_j
        );
        assert_relative_eq!(
            network.bias_connection(hidden).unwrap().weight(),
            -0.2 - 0.5 * a_j * (1.0 - a_j) * s_j
        );

        // Both outputs contribute to the error term of the hidden unit
        let first_only = 0.4 - 0.5 * a_j * (1.0 - a_j) * a_i * delta_first * w_first;
        assert!((network.connection(input, hidden).unwrap().weight() - first_only).abs() > 1e-9);
    }

    #[test]
    fn test_momentum_is_applied() {
        let (mut network, _, hidden, output) = tiny_network();
        let backprop = NeuraBackprop::new(0.5, 0.6);

        network.eval(&[1.0]).unwrap();
        backprop.apply(&mut network, &[1.0]).unwrap();
        let first_delta = network.connection(hidden, output).unwrap().delta_weight();
        let weight_before = network.connection(hidden, output).unwrap().weight();

        let a_k = network.eval(&[1.0]).unwrap()[0];
        let a_j = network.unit(hidden).unwrap().output();
        backprop.apply(&mut network, &[1.0]).unwrap();

        let delta_k = -(1.0 - a_k) * a_k * (1.0 - a_k);
        let second_delta = -0.5 * a_j * delta_k;
        let connection = network.connection(hidden, output).unwrap();

        assert_relative_eq!(connection.delta_weight(), second_delta);
        assert_relative_eq!(connection.prev_delta_weight(), first_delta);
        assert_relative_eq!(
            connection.weight(),
            weight_before + second_delta + 0.6 * first_delta
        );
    }

    #[test]
    fn test_error_decreases() {
        let mut network = build_network(2, 3, 1, Sigmoid::default(), &mut StdRng::seed_from_u64(11));
        let backprop = NeuraBackprop::new(0.5, 0.0);
        let input = [0.3, 0.9];
        let expected = [0.8];

        let error = |network: &mut NeuraNetwork| {
            let output = network.eval(&input).unwrap();
            (output[0] - expected[0]).powi(2)
        };

        let before = error(&mut network);
        for _ in 0..20 {
            network.eval(&input).unwrap();
            backprop.apply(&mut network, &expected).unwrap();
        }

        assert!(error(&mut network) < before);
    }

    #[test]
    fn test_deep_network_trains() {
        let mut network = NeuraNetworkBuilder::new(2, 2)
            .hidden(4)
            .hidden(3)
            .build(&mut StdRng::seed_from_u64(2));
        let backprop = NeuraBackprop::new(0.5, 0.3);
        let input = [1.0, 0.0];
        let expected = [0.1, 0.9];

        let error = |network: &mut NeuraNetwork| -> f64 {
            let output = network.eval(&input).unwrap();
            output
                .iter()
                .zip(expected)
                .map(|(o, e)| (o - e).powi(2))
                .sum()
        };

        let before = error(&mut network);
        for _ in 0..200 {
            network.eval(&input).unwrap();
            backprop.apply(&mut network, &expected).unwrap();
        }

        assert!(error(&mut network) < before * 0.5);
    }

    #[test]
    fn test_expected_dimensions() {
        let (mut network, ..) = tiny_network();
        network.eval(&[1.0]).unwrap();

        assert_eq!(
            NeuraBackprop::default().apply(&mut network, &[1.0, 0.0]),
            Err(NeuraNetworkErr::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    #[should_panic]
    fn test_invalid_momentum() {
        NeuraBackprop::new(0.1, 1.0);
    }
}
