use super::UnitId;

/// Identifies a connection by its two endpoints; a network holds at most one connection per pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    pub from: UnitId,
    pub to: UnitId,
}

/// A directed, weighted edge between two units of a network.
///
/// Connections are stored in the incoming list of their destination unit,
/// and refer to both of their endpoints by id.
#[derive(Clone, Debug, PartialEq)]
pub struct NeuraConnection {
    from: UnitId,
    to: UnitId,
    weight: f64,

    /// The delta applied during the last update
    delta_weight: f64,

    /// The delta applied during the update before that one, used for momentum
    prev_delta_weight: f64,
}

impl NeuraConnection {
    pub fn new(from: UnitId, to: UnitId, weight: f64) -> Self {
        Self {
            from,
            to,
            weight,
            delta_weight: 0.0,
            prev_delta_weight: 0.0,
        }
    }

    #[inline]
    pub fn id(&self) -> ConnectionId {
        ConnectionId {
            from: self.from,
            to: self.to,
        }
    }

    #[inline]
    pub fn from(&self) -> UnitId {
        self.from
    }

    #[inline]
    pub fn to(&self) -> UnitId {
        self.to
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    #[inline]
    pub fn delta_weight(&self) -> f64 {
        self.delta_weight
    }

    #[inline]
    pub fn prev_delta_weight(&self) -> f64 {
        self.prev_delta_weight
    }

    /// Applies `delta_weight` to the weight of this connection, together with
    /// `momentum` times the delta of the previous update:
    ///
    /// `weight += delta_weight + momentum * previous_delta`
    ///
    /// `delta_weight` then becomes the previous delta of the next update.
    pub fn apply_delta(&mut self, delta_weight: f64, momentum: f64) {
        self.prev_delta_weight = self.delta_weight;
        self.delta_weight = delta_weight;
        self.weight += delta_weight + momentum * self.prev_delta_weight;
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_momentum_update() {
        let partial = 0.35;
        let mut connection = NeuraConnection::new(UnitId(0), UnitId(1), 1.0);
        connection.delta_weight = 0.2;

        connection.apply_delta(-0.1 * partial, 0.5);

        assert_relative_eq!(connection.weight(), 1.0 + (-0.1 * partial) + 0.5 * 0.2);
        assert_relative_eq!(connection.prev_delta_weight(), 0.2);
        assert_relative_eq!(connection.delta_weight(), -0.1 * partial);
    }

    #[test]
    fn test_momentum_uses_previous_update() {
        let mut connection = NeuraConnection::new(UnitId(0), UnitId(1), 0.0);

        // No previous delta: only the delta itself is applied
        connection.apply_delta(0.5, 0.9);
        assert_relative_eq!(connection.weight(), 0.5);

        connection.apply_delta(0.25, 0.9);
        assert_relative_eq!(connection.weight(), 0.5 + 0.25 + 0.9 * 0.5);

        connection.apply_delta(0.0, 0.9);
        assert_relative_eq!(connection.weight(), 0.5 + 0.25 + 0.9 * 0.5 + 0.9 * 0.25);
    }

    #[test]
    fn test_id() {
        let connection = NeuraConnection::new(UnitId(3), UnitId(7), 0.0);
        assert_eq!(
            connection.id(),
            ConnectionId {
                from: UnitId(3),
                to: UnitId(7)
            }
        );
    }
}
