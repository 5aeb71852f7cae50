#![allow(unused_variables)]

use super::NeuraDerivable;

macro_rules! impl_derivable {
    ( $type:ty, $self:ident, $variable:ident, $eval:expr, $derivate:expr ) => {
        impl NeuraDerivable for $type {
            #[inline(always)]
            fn eval($self: &Self, $variable: f64) -> f64 {
                $eval
            }

            #[inline(always)]
            fn derivate($self: &Self, $variable: f64) -> f64 {
                $derivate
            }
        }
    };

    ( $type:ty, $variable:ident, $eval:expr, $derivate:expr ) => {
        impl_derivable!($type, self, $variable, $eval, $derivate);
    };
}

/// Passes the net input through unchanged; used by the input layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Identity;

impl_derivable!(Identity, x, x, 1.0);

/// The logistic function `1 / (1 + e^(-slope * x))`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sigmoid {
    pub slope: f64,
}

impl Sigmoid {
    pub fn new(slope: f64) -> Self {
        Self { slope }
    }
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self { slope: 1.0 }
    }
}

impl_derivable!(
    Sigmoid,
    self,
    x,
    1.0 / (1.0 + (-self.slope * x).exp()),
    {
        let y = self.eval(x);
        self.slope * y * (1.0 - y)
    }
);

/// Outputs `above` if the net input reaches `threshold`, and `below` otherwise.
///
/// The step function has no useful derivative (it is `0` everywhere except at the threshold),
/// so `derivate` returns `0`; it should not be used in layers trained through backpropagation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub threshold: f64,
    pub above: f64,
    pub below: f64,
}

impl Step {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            above: 1.0,
            below: 0.0,
        }
    }
}

impl_derivable!(
    Step,
    self,
    x,
    {
        if x >= self.threshold {
            self.above
        } else {
            self.below
        }
    },
    0.0
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relu;

impl_derivable!(Relu, x, x.max(0.0), {
    if x >= 0.0 {
        1.0
    } else {
        0.0
    }
});

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sinusoid;

impl_derivable!(Sinusoid, x, x.sin(), x.cos());

/// The weighted sum plus a fixed offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearCombination {
    pub bias: f64,
}

impl LinearCombination {
    pub fn new(bias: f64) -> Self {
        Self { bias }
    }
}

impl_derivable!(LinearCombination, self, x, x + self.bias, 1.0);
