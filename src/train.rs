use tracing::{debug, info, warn};

use crate::{
    err::NeuraNetworkErr, gradient_solver::NeuraGradientSolver, network::NeuraNetwork,
    utils::squared_error,
};

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeuraTrainer {
    /// How many epochs (full passes over the dataset) to run for at most.
    /// At least one epoch is always run, even if this is set to zero.
    ///
    /// Defaults to `1000`
    pub max_epochs: u32,

    /// Training stops once the sum of squared errors over an epoch is lower or equal to `min_error`.
    ///
    /// Defaults to `0.001`
    pub min_error: f64,

    /// The trainer will log and record the epoch error at every multiple of `log_epochs` epochs.
    /// If `log_epochs` is zero (default), then no progress will be logged.
    pub log_epochs: u32,
}

impl Default for NeuraTrainer {
    fn default() -> Self {
        Self {
            max_epochs: 1000,
            min_error: 0.001,
            log_epochs: 0,
        }
    }
}

/// The outcome of `NeuraTrainer::train`
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingResult {
    pub epochs_run: u32,

    /// Sum of squared errors over the last epoch
    pub final_error: f64,

    /// Whether `final_error` reached the `min_error` of the trainer;
    /// if not, then training stopped because it ran out of epochs.
    pub converged: bool,

    /// The outputs computed for each sample of the dataset during the last epoch,
    /// before the weights were updated for that sample
    pub outputs: Vec<Vec<f64>>,

    /// `(epoch, error)` pairs, recorded every `log_epochs` epochs
    pub losses: Vec<(u32, f64)>,
}

impl NeuraTrainer {
    pub fn new(max_epochs: u32, min_error: f64) -> Self {
        Self {
            max_epochs,
            min_error,
            ..Default::default()
        }
    }

    pub fn with_log_epochs(mut self, log_epochs: u32) -> Self {
        self.log_epochs = log_epochs;
        self
    }

    /// Trains `network` on `dataset`, one sample at a time, in the order of `dataset`.
    ///
    /// Each sample goes through a forward pass, after which its squared error is added to the error of the epoch
    /// and `gradient_solver` updates the weights of the network.
    ///
    /// The whole dataset is checked against the input and output counts of `network` before training starts,
    /// so a `DimensionMismatch` leaves the network untouched.
    pub fn train<
        GradientSolver: NeuraGradientSolver,
        Input: AsRef<[f64]>,
        Target: AsRef<[f64]>,
    >(
        &self,
        gradient_solver: &GradientSolver,
        network: &mut NeuraNetwork,
        dataset: &[(Input, Target)],
    ) -> Result<TrainingResult, NeuraNetworkErr> {
        for (input, target) in dataset {
            NeuraNetworkErr::check_dimensions(network.input_count(), input.as_ref().len())?;
            NeuraNetworkErr::check_dimensions(network.output_count(), target.as_ref().len())?;
        }

        let mut outputs = vec![Vec::new(); dataset.len()];
        let mut losses = Vec::new();
        let mut epoch = 0;

        let error = loop {
            let mut error = 0.0;

            for (index, (input, target)) in dataset.iter().enumerate() {
                let target = target.as_ref();

                network.set_input(input.as_ref())?;
                network.forward();

                let output = network.get_output();
                error += squared_error(&output, target);

                gradient_solver.apply(network, target)?;
                outputs[index] = output;
            }

            epoch += 1;

            if self.log_epochs > 0 && epoch % self.log_epochs == 0 {
                debug!(epoch, error, "Training progress");
                losses.push((epoch, error));
            }

            if epoch >= self.max_epochs || error <= self.min_error {
                break error;
            }
        };

        let converged = error <= self.min_error;
        if converged {
            info!(epochs = epoch, error, "Training converged");
        } else {
            warn!(
                epochs = epoch,
                error,
                min_error = self.min_error,
                "Training did not converge within the epoch budget"
            );
        }

        Ok(TrainingResult {
            epochs_run: epoch,
            final_error: error,
            converged,
            outputs,
            losses,
        })
    }
}

impl NeuraNetwork {
    /// Trains the network with its own `backprop` solver; see `NeuraTrainer::train`
    pub fn train<Input: AsRef<[f64]>, Target: AsRef<[f64]>>(
        &mut self,
        dataset: &[(Input, Target)],
        max_epochs: u32,
        min_error: f64,
    ) -> Result<TrainingResult, NeuraNetworkErr> {
        let backprop = self.backprop;
        NeuraTrainer::new(max_epochs, min_error).train(&backprop, self, dataset)
    }
}
