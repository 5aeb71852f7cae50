use crate::derivable::{NeuraDerivable, NeuraInputSum};

use super::NeuraConnection;

/// Stable identifier of a unit: its index in the arena of the network that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub usize);

impl UnitId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single neuron: one scalar output, computed from its incoming connections.
///
/// The activation and input-summing strategies are chosen when the unit is created and never change afterwards.
#[derive(Clone, Debug)]
pub struct NeuraUnit {
    id: UnitId,
    output: f64,
    activation: Box<dyn NeuraDerivable>,
    input_sum: Box<dyn NeuraInputSum>,

    /// Ordered by insertion
    incoming: Vec<NeuraConnection>,

    /// Destinations of the connections starting from this unit, ordered by insertion
    outgoing: Vec<UnitId>,
}

impl NeuraUnit {
    pub(crate) fn new(
        id: UnitId,
        activation: Box<dyn NeuraDerivable>,
        input_sum: Box<dyn NeuraInputSum>,
    ) -> Self {
        Self {
            id,
            output: 0.0,
            activation,
            input_sum,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    pub(crate) fn set_output(&mut self, output: f64) {
        self.output = output;
    }

    pub fn activation(&self) -> &dyn NeuraDerivable {
        self.activation.as_ref()
    }

    pub fn input_sum(&self) -> &dyn NeuraInputSum {
        self.input_sum.as_ref()
    }

    pub fn incoming(&self) -> &[NeuraConnection] {
        &self.incoming
    }

    pub(crate) fn incoming_mut(&mut self) -> &mut [NeuraConnection] {
        &mut self.incoming
    }

    pub fn outgoing(&self) -> &[UnitId] {
        &self.outgoing
    }

    /// Returns the incoming connection coming from `from`, if any
    pub fn connection_from(&self, from: UnitId) -> Option<&NeuraConnection> {
        self.incoming.iter().find(|connection| connection.from() == from)
    }

    pub fn connection_from_mut(&mut self, from: UnitId) -> Option<&mut NeuraConnection> {
        self.incoming
            .iter_mut()
            .find(|connection| connection.from() == from)
    }

    pub fn is_connected_from(&self, from: UnitId) -> bool {
        self.connection_from(from).is_some()
    }

    pub fn is_connected_to(&self, to: UnitId) -> bool {
        self.outgoing.contains(&to)
    }

    /// Pushes `connection` to the incoming list; returns `false` (and does nothing)
    /// if a connection from the same source already exists.
    pub(crate) fn push_incoming(&mut self, connection: NeuraConnection) -> bool {
        debug_assert_eq!(connection.to(), self.id);

        if self.is_connected_from(connection.from()) {
            return false;
        }
        self.incoming.push(connection);
        true
    }

    pub(crate) fn push_outgoing(&mut self, to: UnitId) -> bool {
        if self.is_connected_to(to) {
            return false;
        }
        self.outgoing.push(to);
        true
    }

    pub(crate) fn remove_incoming(&mut self, from: UnitId) -> Option<NeuraConnection> {
        let index = self
            .incoming
            .iter()
            .position(|connection| connection.from() == from)?;
        Some(self.incoming.remove(index))
    }

    pub(crate) fn remove_outgoing(&mut self, to: UnitId) -> bool {
        match self.outgoing.iter().position(|&id| id == to) {
            Some(index) => {
                self.outgoing.remove(index);
                true
            }
            None => false,
        }
    }

    /// Computes the net input of this unit, given the arena of the network it belongs to
    #[inline]
    pub fn net_input(&self, units: &[NeuraUnit]) -> f64 {
        self.input_sum().collect(&self.incoming, units)
    }
}
