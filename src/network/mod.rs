use crate::{
    derivable::{activation::Identity, input::WeightedSum, NeuraDerivable, NeuraInputSum},
    err::NeuraNetworkErr,
    gradient_solver::NeuraBackprop,
};

mod connection;
pub use connection::*;

mod unit;
pub use unit::*;

mod construct;
pub use construct::*;

mod forward;

/// Where a unit sits within the layered structure of a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeuraLayerPosition {
    Bias,
    Input,
    Hidden(usize),
    Output,
}

/// A layered feed-forward network, stored as a graph of units.
///
/// ## Class invariants
///
/// - `units[i].id() == UnitId(i)`, and `positions[i]` is the position of `units[i]`
/// - `units[bias]` is not part of any layer and its output is always `1`
/// - the incoming connections of a unit in `hidden_layers[l]` come from `hidden_layers[l - 1]`
///   (or `input_layer` if `l == 0`) and from the bias unit; the same goes for `output_layer`,
///   with the last hidden layer as predecessor. The graph is thus acyclic.
/// - `b` is in the outgoing list of `a` iff `b` has an incoming connection from `a`
#[derive(Clone, Debug)]
pub struct NeuraNetwork {
    pub(crate) units: Vec<NeuraUnit>,
    pub(crate) positions: Vec<NeuraLayerPosition>,

    pub(crate) bias: UnitId,
    pub(crate) input_layer: Vec<UnitId>,
    pub(crate) hidden_layers: Vec<Vec<UnitId>>,
    pub(crate) output_layer: Vec<UnitId>,

    /// The gradient solver used by `NeuraNetwork::train`
    pub backprop: NeuraBackprop,
}

impl Default for NeuraNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl NeuraNetwork {
    /// Creates a network without any layer, containing only its bias unit
    pub fn new() -> Self {
        let bias = UnitId(0);
        let mut bias_unit = NeuraUnit::new(bias, Box::new(Identity), Box::new(WeightedSum));
        bias_unit.set_output(1.0);

        Self {
            units: vec![bias_unit],
            positions: vec![NeuraLayerPosition::Bias],
            bias,
            input_layer: Vec::new(),
            hidden_layers: Vec::new(),
            output_layer: Vec::new(),
            backprop: NeuraBackprop::default(),
        }
    }

    fn push_unit(
        &mut self,
        position: NeuraLayerPosition,
        activation: Box<dyn NeuraDerivable>,
        input_sum: Box<dyn NeuraInputSum>,
    ) -> UnitId {
        let id = UnitId(self.units.len());
        self.units.push(NeuraUnit::new(id, activation, input_sum));
        self.positions.push(position);
        id
    }

    /// Appends a unit to the input layer; input units use the identity activation
    pub fn add_input_unit(&mut self) -> UnitId {
        let id = self.push_unit(
            NeuraLayerPosition::Input,
            Box::new(Identity),
            Box::new(WeightedSum),
        );
        self.input_layer.push(id);
        id
    }

    /// Appends a unit to the hidden layer `layer`.
    /// If `layer` is equal to the number of hidden layers, then a new hidden layer is created.
    pub fn add_hidden_unit(
        &mut self,
        layer: usize,
        activation: Box<dyn NeuraDerivable>,
        input_sum: Box<dyn NeuraInputSum>,
    ) -> Result<UnitId, NeuraNetworkErr> {
        if layer > self.hidden_layers.len() {
            return Err(NeuraNetworkErr::InvalidTopology(format!(
                "cannot add a unit to hidden layer {}, the network only has {} hidden layers",
                layer,
                self.hidden_layers.len()
            )));
        }
        if layer == self.hidden_layers.len() {
            self.hidden_layers.push(Vec::new());
        }

        let id = self.push_unit(NeuraLayerPosition::Hidden(layer), activation, input_sum);
        self.hidden_layers[layer].push(id);
        Ok(id)
    }

    pub fn add_output_unit(
        &mut self,
        activation: Box<dyn NeuraDerivable>,
        input_sum: Box<dyn NeuraInputSum>,
    ) -> UnitId {
        let id = self.push_unit(NeuraLayerPosition::Output, activation, input_sum);
        self.output_layer.push(id);
        id
    }

    #[inline]
    pub fn bias(&self) -> UnitId {
        self.bias
    }

    pub fn units(&self) -> &[NeuraUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Result<&NeuraUnit, NeuraNetworkErr> {
        self.units
            .get(id.index())
            .ok_or(NeuraNetworkErr::UnknownUnitReference(id))
    }

    pub fn position(&self, id: UnitId) -> Result<NeuraLayerPosition, NeuraNetworkErr> {
        self.positions
            .get(id.index())
            .copied()
            .ok_or(NeuraNetworkErr::UnknownUnitReference(id))
    }

    pub fn input_layer(&self) -> &[UnitId] {
        &self.input_layer
    }

    pub fn hidden_layers(&self) -> &[Vec<UnitId>] {
        &self.hidden_layers
    }

    pub fn output_layer(&self) -> &[UnitId] {
        &self.output_layer
    }

    #[inline]
    pub fn input_count(&self) -> usize {
        self.input_layer.len()
    }

    #[inline]
    pub fn output_count(&self) -> usize {
        self.output_layer.len()
    }

    pub fn connection_count(&self) -> usize {
        self.units.iter().map(|unit| unit.incoming().len()).sum()
    }

    /// Returns the position of the layer that units at `position` may receive connections from,
    /// or `None` if units at `position` may not have incoming connections.
    fn predecessor(&self, position: NeuraLayerPosition) -> Option<NeuraLayerPosition> {
        match position {
            NeuraLayerPosition::Bias | NeuraLayerPosition::Input => None,
            NeuraLayerPosition::Hidden(0) => Some(NeuraLayerPosition::Input),
            NeuraLayerPosition::Hidden(layer) => Some(NeuraLayerPosition::Hidden(layer - 1)),
            NeuraLayerPosition::Output => match self.hidden_layers.len() {
                0 => Some(NeuraLayerPosition::Input),
                n => Some(NeuraLayerPosition::Hidden(n - 1)),
            },
        }
    }

    fn check_link(&self, from: UnitId, to: UnitId) -> Result<(), NeuraNetworkErr> {
        let from_position = self.position(from)?;
        let to_position = self.position(to)?;

        if from == to {
            return Err(NeuraNetworkErr::InvalidTopology(format!(
                "unit {} cannot be connected to itself",
                from
            )));
        }

        let allowed = match self.predecessor(to_position) {
            Some(predecessor) => {
                from_position == predecessor || from_position == NeuraLayerPosition::Bias
            }
            None => false,
        };

        if !allowed {
            return Err(NeuraNetworkErr::InvalidTopology(format!(
                "cannot connect {} ({:?}) to {} ({:?})",
                from, from_position, to, to_position
            )));
        }

        Ok(())
    }

    /// Registers `connection` on both of its endpoints, without any validation.
    /// Returns `false` if the connection already existed.
    pub(crate) fn link(&mut self, connection: NeuraConnection) -> bool {
        let (from, to) = (connection.from(), connection.to());

        if !self.units[to.index()].push_incoming(connection) {
            return false;
        }
        self.units[from.index()].push_outgoing(to);
        true
    }

    /// Adds `connection` to the incoming connections of `unit`, and to the outgoing connections of its source.
    ///
    /// Returns `Ok(false)` if a connection between the same two units already exists, in which case nothing is changed.
    /// Fails with `InvalidTopology` if `connection` does not point to `unit`, or if it would break the layered structure.
    pub fn add_connection(
        &mut self,
        unit: UnitId,
        connection: NeuraConnection,
    ) -> Result<bool, NeuraNetworkErr> {
        if connection.to() != unit {
            return Err(NeuraNetworkErr::InvalidTopology(format!(
                "connection {} -> {} cannot be added as an incoming connection of {}",
                connection.from(),
                connection.to(),
                unit
            )));
        }
        self.check_link(connection.from(), connection.to())?;

        Ok(self.link(connection))
    }

    /// Connects `from` to `to` with the given weight; see `add_connection`
    pub fn connect(&mut self, from: UnitId, to: UnitId, weight: f64) -> Result<bool, NeuraNetworkErr> {
        self.add_connection(to, NeuraConnection::new(from, to, weight))
    }

    /// Removes the connection from `from` to `to`, updating both units.
    /// Returns the removed connection, or `None` if the two units were not connected.
    pub fn disconnect(
        &mut self,
        from: UnitId,
        to: UnitId,
    ) -> Result<Option<NeuraConnection>, NeuraNetworkErr> {
        self.unit(from)?;
        self.unit(to)?;

        let removed = self.units[to.index()].remove_incoming(from);
        if removed.is_some() {
            self.units[from.index()].remove_outgoing(to);
        }

        Ok(removed)
    }

    pub fn connection(&self, from: UnitId, to: UnitId) -> Option<&NeuraConnection> {
        self.units.get(to.index())?.connection_from(from)
    }

    pub fn connection_mut(&mut self, from: UnitId, to: UnitId) -> Option<&mut NeuraConnection> {
        self.units.get_mut(to.index())?.connection_from_mut(from)
    }

    pub fn set_weight(&mut self, from: UnitId, to: UnitId, weight: f64) -> Result<(), NeuraNetworkErr> {
        self.unit(from)?;
        self.unit(to)?;

        match self.connection_mut(from, to) {
            Some(connection) => {
                connection.set_weight(weight);
                Ok(())
            }
            None => Err(NeuraNetworkErr::InvalidTopology(format!(
                "there is no connection from {} to {}",
                from, to
            ))),
        }
    }

    /// Returns the connection from the bias unit to `unit`, if any
    pub fn bias_connection(&self, unit: UnitId) -> Option<&NeuraConnection> {
        self.connection(self.bias, unit)
    }
}
