use neuragraph::prelude::*;
use textplots::{Chart, Plot, Shape};

const MAX_EPOCHS: u32 = 50000;
const MIN_ERROR: f64 = 0.001;

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format!("{:?}", value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    tracing_subscriber::fmt::init();

    let inputs = [
        ([1.0, 1.0], [0.0]),
        ([1.0, 0.0], [1.0]),
        ([0.0, 1.0], [1.0]),
        ([0.0, 0.0], [0.0]),
    ];

    let mut network = NeuraNetworkBuilder::new(2, 1)
        .hidden(4)
        .activation(Sigmoid::default())
        .backprop(NeuraBackprop::new(2.9, 0.7))
        .build(&mut rand::thread_rng());

    let trainer = NeuraTrainer::new(MAX_EPOCHS, MIN_ERROR).with_log_epochs(10);
    let backprop = network.backprop;
    let result = trainer
        .train(&backprop, &mut network, &inputs)
        .expect("Couldn't train the network");

    println!("Multilayer perceptron with XOR training");
    for ((input, expected), actual) in inputs.iter().zip(&result.outputs) {
        println!(
            "INPUTS: {} EXPECTED: {} ACTUAL: {}",
            format_values(input),
            format_values(expected),
            format_values(actual)
        );
    }
    println!();

    println!("Sum of squared errors = {}", result.final_error);
    println!("EPOCH {}", result.epochs_run);
    if !result.converged && result.epochs_run == MAX_EPOCHS {
        println!("Error in training, try again!");
    }

    if !result.losses.is_empty() {
        let points: Vec<(f32, f32)> = result
            .losses
            .iter()
            .map(|&(epoch, error)| (epoch as f32, error as f32))
            .collect();

        println!();
        Chart::new(120, 60, 0.0, result.epochs_run as f32)
            .lineplot(&Shape::Lines(&points))
            .display();
    }
}
