//! The feed-forward network backing the sequence predictor.
//!
//! One hidden layer, sigmoid activations on both layers, per-sample
//! gradient descent. Parameters are owned `Vec`s; no shared mutable
//! state between model instances.

use rand::rngs::StdRng;
use rand::Rng;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A window ► hidden ► 1 network with owned parameter storage.
///
/// Hidden size is half the input width (minimum 1). Weights and biases
/// initialize uniformly in [-1, 1].
#[derive(Clone, Debug)]
pub struct FeedForwardNetwork {
    input_size: usize,
    hidden_size: usize,
    /// Hidden-layer weights, `hidden_size` rows of `input_size`.
    w1: Vec<Vec<f64>>,
    b1: Vec<f64>,
    /// Output-layer weights, one per hidden unit.
    w2: Vec<f64>,
    b2: f64,
    learning_rate: f64,
}

impl FeedForwardNetwork {
    pub fn new(input_size: usize, learning_rate: f64, rng: &mut StdRng) -> Self {
        let hidden_size = (input_size / 2).max(1);
        let w1 = (0..hidden_size)
            .map(|_| (0..input_size).map(|_| rng.gen_range(-1.0..=1.0)).collect())
            .collect();
        let b1 = (0..hidden_size).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        let w2 = (0..hidden_size).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        let b2 = rng.gen_range(-1.0..=1.0);

        Self {
            input_size,
            hidden_size,
            w1,
            b1,
            w2,
            b2,
            learning_rate,
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Forward pass: hidden activations and the output activation.
    fn forward(&self, input: &[f64]) -> (Vec<f64>, f64) {
        let hidden: Vec<f64> = self
            .w1
            .iter()
            .zip(&self.b1)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                sigmoid(sum + bias)
            })
            .collect();

        let sum: f64 = self.w2.iter().zip(&hidden).map(|(w, h)| w * h).sum();
        let output = sigmoid(sum + self.b2);
        (hidden, output)
    }

    /// Predict the scaled successor of a window. Read-only.
    pub fn predict(&self, input: &[f64]) -> f64 {
        self.forward(input).1
    }

    /// One gradient-descent step on a single sample. Returns the squared
    /// prediction error before the update.
    ///
    /// Output layer updates first from `(target − prediction) · σ′`,
    /// the error then propagates backward through the output weights.
    pub fn train_sample(&mut self, input: &[f64], target: f64) -> f64 {
        let (hidden, prediction) = self.forward(input);

        let error = target - prediction;
        let output_delta = error * prediction * (1.0 - prediction);

        // Hidden deltas use the pre-update output weights.
        let hidden_deltas: Vec<f64> = self
            .w2
            .iter()
            .zip(&hidden)
            .map(|(w, h)| output_delta * w * h * (1.0 - h))
            .collect();

        for (w, h) in self.w2.iter_mut().zip(&hidden) {
            *w += self.learning_rate * output_delta * h;
        }
        self.b2 += self.learning_rate * output_delta;

        for ((row, bias), delta) in self.w1.iter_mut().zip(&mut self.b1).zip(&hidden_deltas) {
            for (w, x) in row.iter_mut().zip(input) {
                *w += self.learning_rate * delta * x;
            }
            *bias += self.learning_rate * delta;
        }

        error * error
    }
}
