//! The sequence predictor: training, scoring, and reconfiguration.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use argus_types::{Anomaly, AnomalyId, Severity, TimeSeries};

use crate::cancel::CancelToken;
use crate::error::{EngineError, EngineResult};

use super::network::FeedForwardNetwork;
use super::scaler::MinMaxScaler;
use super::{
    DEFAULT_ANOMALY_THRESHOLD, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE, DEFAULT_SENSITIVITY,
    MIN_WINDOW_SIZE,
};

// ── Configuration ───────────────────────────────────────────────────────

/// Full predictor configuration.
#[derive(Clone, Debug)]
pub struct PredictorConfig {
    /// Sliding-window width (floor of 10 enforced at validation).
    pub window_size: usize,
    /// Anomaly cutoff on the scaled prediction error.
    pub threshold: f64,
    /// Gradient-descent learning rate.
    pub learning_rate: f64,
    /// Training epochs per `train` call.
    pub epochs: usize,
    /// Multiplier applied to the base score.
    pub sensitivity: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            window_size: MIN_WINDOW_SIZE,
            threshold: DEFAULT_ANOMALY_THRESHOLD,
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl PredictorConfig {
    /// Validate all fields eagerly.
    pub fn validate(&self) -> EngineResult<()> {
        if self.window_size < MIN_WINDOW_SIZE {
            return Err(EngineError::InvalidInput(format!(
                "window_size must be at least {}, got {}",
                MIN_WINDOW_SIZE, self.window_size
            )));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        if !self.learning_rate.is_finite()
            || self.learning_rate <= 0.0
            || self.learning_rate > 1.0
        {
            return Err(EngineError::InvalidInput(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(EngineError::InvalidInput("epochs must be non-zero".into()));
        }
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "sensitivity must be a positive finite number, got {}",
                self.sensitivity
            )));
        }
        Ok(())
    }
}

/// Partial reconfiguration, applied atomically after validation.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PredictorOptions {
    /// Replaces the anomaly cutoff.
    pub threshold: Option<f64>,
    /// Rebuilds network topology and forces retraining (window size
    /// changes input dimensionality).
    pub window_size: Option<usize>,
    /// Replaces the gradient-descent step size.
    pub learning_rate: Option<f64>,
}

// ── Predictor ───────────────────────────────────────────────────────────

/// Online-trainable next-value predictor over a numeric stream.
///
/// Owns its network parameters and scaler exclusively; scoring reads
/// frozen state, training and reconfiguration are the only mutation
/// points.
pub struct SequencePredictor {
    config: PredictorConfig,
    network: FeedForwardNetwork,
    scaler: MinMaxScaler,
    trained: bool,
    rng: StdRng,
}

impl SequencePredictor {
    /// Create an untrained predictor. Fails eagerly on invalid
    /// configuration.
    pub fn new(config: PredictorConfig) -> EngineResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a predictor with a fixed seed for reproducible weight
    /// initialization.
    pub fn with_seed(config: PredictorConfig, seed: u64) -> EngineResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PredictorConfig, mut rng: StdRng) -> EngineResult<Self> {
        config.validate()?;
        let network =
            FeedForwardNetwork::new(config.window_size, config.learning_rate, &mut rng);
        Ok(Self {
            config,
            network,
            scaler: MinMaxScaler::new(),
            trained: false,
            rng,
        })
    }

    /// Whether a full training pass has completed since the last
    /// structural change.
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Train on the pooled values of the given series.
    ///
    /// Requires at least `2 × window_size` scalar points across all
    /// series. Cancellation is polled between samples; a cancelled pass
    /// leaves the predictor untrained.
    pub fn train(&mut self, batch: &[TimeSeries], cancel: &CancelToken) -> EngineResult<()> {
        let pooled = pool_values(batch)?;
        self.train_on_values(&pooled, cancel)
    }

    /// Score a series: predict each window's successor and flag windows
    /// whose scaled prediction error exceeds the threshold.
    ///
    /// An untrained predictor trains on the same series first. Returns
    /// the flagged anomalies and a base score (mean flagged error times
    /// sensitivity, 0 when nothing is flagged).
    pub fn score(
        &mut self,
        series: &TimeSeries,
        cancel: &CancelToken,
    ) -> EngineResult<(Vec<Anomaly>, f64)> {
        let values = series_values(series)?;

        if !self.trained {
            self.train_on_values(&values, cancel)?;
            debug!(series = %series.name, "predictor self-bootstrapped from scored series");
        }

        self.forecast_values(series, &values)
    }

    /// Read-only scoring against frozen weights. Concurrent callers may
    /// hold shared references; an untrained predictor is a misuse error
    /// here (use [`score`](Self::score), which bootstraps).
    pub fn forecast(&self, series: &TimeSeries) -> EngineResult<(Vec<Anomaly>, f64)> {
        if !self.trained {
            return Err(EngineError::InvalidInput(
                "predictor is not trained; call train() or score() first".into(),
            ));
        }
        let values = series_values(series)?;
        self.forecast_values(series, &values)
    }

    fn forecast_values(
        &self,
        series: &TimeSeries,
        values: &[f64],
    ) -> EngineResult<(Vec<Anomaly>, f64)> {
        let window = self.config.window_size;
        if values.len() <= window {
            return Ok((Vec::new(), 0.0));
        }

        let scaled: Vec<f64> = values.iter().map(|&v| self.scaler.transform(v)).collect();

        let mut anomalies = Vec::new();
        let mut flagged_errors = Vec::new();
        for i in 0..values.len() - window {
            let predicted = self.network.predict(&scaled[i..i + window]);
            let actual = scaled[i + window];
            let error = (predicted - actual).abs();
            if error > self.config.threshold {
                let point = &series.points[i + window];
                let severity = Self::severity_for(error, self.config.threshold);
                let mut metadata = HashMap::new();
                metadata.insert("prediction_error".to_string(), serde_json::json!(error));
                metadata.insert("point_index".to_string(), serde_json::json!(i + window));

                anomalies.push(Anomaly {
                    id: AnomalyId::new(),
                    severity,
                    score: error.clamp(0.0, 1.0),
                    timestamp: point.timestamp,
                    observed_value: values[i + window],
                    expected_value: self.scaler.inverse_transform(predicted),
                    source: series.name.clone(),
                    message: format!(
                        "prediction error {:.3} exceeds threshold {:.2}",
                        error, self.config.threshold
                    ),
                    metadata,
                });
                flagged_errors.push(error);
            }
        }

        let base_score = if flagged_errors.is_empty() {
            0.0
        } else {
            let mean = flagged_errors.iter().sum::<f64>() / flagged_errors.len() as f64;
            (mean * self.config.sensitivity).clamp(0.0, 1.0)
        };

        Ok((anomalies, base_score))
    }

    /// Apply a partial reconfiguration. All supplied options are
    /// validated before any is applied; a window-size change rebuilds
    /// the network and invalidates the scaler and training flag.
    pub fn configure(&mut self, options: &PredictorOptions) -> EngineResult<()> {
        let mut candidate = self.config.clone();
        if let Some(threshold) = options.threshold {
            candidate.threshold = threshold;
        }
        if let Some(window_size) = options.window_size {
            candidate.window_size = window_size;
        }
        if let Some(learning_rate) = options.learning_rate {
            candidate.learning_rate = learning_rate;
        }
        candidate.validate()?;

        let window_changed = candidate.window_size != self.config.window_size;
        self.config = candidate;

        if window_changed {
            self.network = FeedForwardNetwork::new(
                self.config.window_size,
                self.config.learning_rate,
                &mut self.rng,
            );
            self.scaler.reset();
            self.trained = false;
            debug!(
                window_size = self.config.window_size,
                "window size changed; model rebuilt and marked untrained"
            );
        } else {
            self.network.set_learning_rate(self.config.learning_rate);
        }
        Ok(())
    }

    /// Release model and scaler state, returning to cold-start.
    pub fn close(&mut self) {
        self.network = FeedForwardNetwork::new(
            self.config.window_size,
            self.config.learning_rate,
            &mut self.rng,
        );
        self.scaler.reset();
        self.trained = false;
    }

    /// Opaque per-model metrics passed through to the metrics
    /// collaborator.
    pub fn metrics(&self) -> HashMap<String, serde_json::Value> {
        let mut m = HashMap::new();
        m.insert("trained".to_string(), serde_json::json!(self.trained));
        m.insert(
            "window_size".to_string(),
            serde_json::json!(self.config.window_size),
        );
        m.insert(
            "hidden_size".to_string(),
            serde_json::json!(self.network.hidden_size()),
        );
        m.insert(
            "threshold".to_string(),
            serde_json::json!(self.config.threshold),
        );
        m.insert(
            "learning_rate".to_string(),
            serde_json::json!(self.config.learning_rate),
        );
        m.insert("epochs".to_string(), serde_json::json!(self.config.epochs));
        m
    }

    // ── Private helpers ─────────────────────────────────────────────

    fn train_on_values(&mut self, values: &[f64], cancel: &CancelToken) -> EngineResult<()> {
        let required = 2 * self.config.window_size;
        if values.len() < required {
            return Err(EngineError::InsufficientData {
                required,
                actual: values.len(),
            });
        }

        // A pass that does not finish must not leave stale weights
        // marked as trained.
        self.trained = false;

        self.scaler.fit(values);
        let scaled: Vec<f64> = values.iter().map(|&v| self.scaler.transform(v)).collect();

        let window = self.config.window_size;
        let mut final_loss = 0.0;
        for _ in 0..self.config.epochs {
            let mut epoch_loss = 0.0;
            for i in 0..scaled.len() - window {
                if cancel.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }
                let loss = self.network.train_sample(&scaled[i..i + window], scaled[i + window]);
                if !loss.is_finite() {
                    return Err(EngineError::TrainingFailed(
                        "non-finite loss during gradient descent".into(),
                    ));
                }
                epoch_loss += loss;
            }
            final_loss = epoch_loss;
        }

        debug!(
            samples = scaled.len() - window,
            epochs = self.config.epochs,
            final_loss,
            "training pass complete"
        );
        self.trained = true;
        Ok(())
    }

    /// Severity ladder on the error/threshold ratio.
    fn severity_for(error: f64, threshold: f64) -> Severity {
        if error >= 4.0 * threshold {
            Severity::Critical
        } else if error >= 2.5 * threshold {
            Severity::High
        } else if error >= 1.5 * threshold {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Extract the numeric values of a series, rejecting non-numeric points.
pub(crate) fn series_values(series: &TimeSeries) -> EngineResult<Vec<f64>> {
    series
        .points
        .iter()
        .map(|p| {
            p.numeric_value()
                .ok_or_else(|| EngineError::UnsupportedValueType(p.value_kind().to_string()))
        })
        .collect()
}

/// Pool values across a batch of series, preserving order.
fn pool_values(batch: &[TimeSeries]) -> EngineResult<Vec<f64>> {
    let mut pooled = Vec::new();
    for series in batch {
        pooled.extend(series_values(series)?);
    }
    Ok(pooled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_types::DataPoint;
    use chrono::Utc;

    fn ramp_series(name: &str, n: usize) -> TimeSeries {
        let mut series = TimeSeries::new(name);
        for i in 0..n {
            series.push(DataPoint::new(format!("p{}", i), Utc::now(), i as f64));
        }
        series
    }

    fn predictor() -> SequencePredictor {
        SequencePredictor::with_seed(PredictorConfig::default(), 42).unwrap()
    }

    #[test]
    fn rejects_invalid_configuration() {
        let bad = PredictorConfig {
            window_size: 3,
            ..PredictorConfig::default()
        };
        assert!(SequencePredictor::with_seed(bad, 1).is_err());

        let bad = PredictorConfig {
            learning_rate: 0.0,
            ..PredictorConfig::default()
        };
        assert!(SequencePredictor::with_seed(bad, 1).is_err());
    }

    #[test]
    fn training_requires_twice_window_points() {
        let mut p = predictor();
        let err = p
            .train(&[ramp_series("s", 15)], &CancelToken::new())
            .unwrap_err();
        match err {
            EngineError::InsufficientData { required, actual } => {
                assert_eq!(required, 20);
                assert_eq!(actual, 15);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
        assert!(!p.is_trained());
    }

    #[test]
    fn training_pools_across_series() {
        let mut p = predictor();
        // 12 + 12 = 24 points >= 20.
        let batch = vec![ramp_series("a", 12), ramp_series("b", 12)];
        p.train(&batch, &CancelToken::new()).unwrap();
        assert!(p.is_trained());
    }

    #[test]
    fn cancelled_training_leaves_untrained() {
        let mut p = predictor();
        let token = CancelToken::new();
        token.cancel();

        let err = p.train(&[ramp_series("s", 30)], &token).unwrap_err();
        assert!(matches!(err, EngineError::Cancelled));
        assert!(!p.is_trained());
    }

    #[test]
    fn non_numeric_point_is_rejected() {
        let mut series = ramp_series("s", 25);
        series.points[5].value = serde_json::json!("not a number");

        let mut p = predictor();
        let err = p.train(&[series], &CancelToken::new()).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedValueType(_)));
    }

    #[test]
    fn score_self_bootstraps_when_untrained() {
        let mut p = predictor();
        assert!(!p.is_trained());

        let (_, _) = p.score(&ramp_series("s", 30), &CancelToken::new()).unwrap();
        assert!(p.is_trained());
    }

    #[test]
    fn trained_model_fits_its_own_ramp() {
        let mut p = predictor();
        let series = ramp_series("s", 40);
        p.train(&[series.clone()], &CancelToken::new()).unwrap();

        let (anomalies, score) = p.score(&series, &CancelToken::new()).unwrap();
        assert!(
            anomalies.is_empty(),
            "a fitted ramp should not flag itself: {:?}",
            anomalies
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn training_convergence_on_linear_series() {
        // Mean prediction error of a trained network beats the same
        // randomly initialized network on identical data.
        let mut rng = StdRng::seed_from_u64(3);
        let untrained = FeedForwardNetwork::new(10, 0.01, &mut rng);
        let mut trained = untrained.clone();

        let values: Vec<f64> = (0..30).map(|i| i as f64 / 29.0).collect();
        for _ in 0..100 {
            for i in 0..values.len() - 10 {
                trained.train_sample(&values[i..i + 10], values[i + 10]);
            }
        }

        let mean_error = |net: &FeedForwardNetwork| {
            let mut total = 0.0;
            let mut count = 0usize;
            for i in 0..values.len() - 10 {
                total += (net.predict(&values[i..i + 10]) - values[i + 10]).abs();
                count += 1;
            }
            total / count as f64
        };

        assert!(
            mean_error(&trained) < mean_error(&untrained),
            "training should reduce mean prediction error"
        );
    }

    #[test]
    fn deviation_from_learned_pattern_is_flagged() {
        let mut p = SequencePredictor::with_seed(
            PredictorConfig {
                threshold: 0.3,
                ..PredictorConfig::default()
            },
            42,
        )
        .unwrap();

        let train = ramp_series("s", 40);
        p.train(&[train], &CancelToken::new()).unwrap();

        // Same ramp, but one successor collapses to the bottom of the
        // fitted range.
        let mut probe = ramp_series("s", 25);
        probe.points[20].value = serde_json::json!(0.0);

        let (anomalies, score) = p.score(&probe, &CancelToken::new()).unwrap();
        assert!(!anomalies.is_empty(), "collapsed point should be flagged");
        assert!(score > 0.0);

        let flagged = anomalies
            .iter()
            .find(|a| a.observed_value == 0.0)
            .expect("the collapsed point itself should be among the flags");
        assert_eq!(flagged.source, "s");
        assert!(flagged.expected_value > flagged.observed_value);
    }

    #[test]
    fn severity_ladder() {
        let t = 0.5;
        assert_eq!(SequencePredictor::severity_for(2.0, t), Severity::Critical);
        assert_eq!(SequencePredictor::severity_for(1.3, t), Severity::High);
        assert_eq!(SequencePredictor::severity_for(0.8, t), Severity::Medium);
        assert_eq!(SequencePredictor::severity_for(0.6, t), Severity::Low);
    }

    #[test]
    fn window_change_invalidates_training() {
        let mut p = predictor();
        p.train(&[ramp_series("s", 30)], &CancelToken::new()).unwrap();
        assert!(p.is_trained());

        p.configure(&PredictorOptions {
            window_size: Some(12),
            ..PredictorOptions::default()
        })
        .unwrap();
        assert!(!p.is_trained());
        assert_eq!(p.config().window_size, 12);
    }

    #[test]
    fn threshold_change_keeps_training() {
        let mut p = predictor();
        p.train(&[ramp_series("s", 30)], &CancelToken::new()).unwrap();

        p.configure(&PredictorOptions {
            threshold: Some(0.25),
            ..PredictorOptions::default()
        })
        .unwrap();
        assert!(p.is_trained());
        assert!((p.config().threshold - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn configure_rejects_bad_options_atomically() {
        let mut p = predictor();
        let err = p.configure(&PredictorOptions {
            threshold: Some(0.8),
            window_size: Some(2), // below floor
            learning_rate: None,
        });
        assert!(err.is_err());
        // The valid threshold option must not have been applied.
        assert!((p.config().threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn close_returns_to_cold_state() {
        let mut p = predictor();
        p.train(&[ramp_series("s", 30)], &CancelToken::new()).unwrap();
        assert!(p.is_trained());

        p.close();
        assert!(!p.is_trained());
    }

    #[test]
    fn short_series_scores_neutral_when_trained() {
        let mut p = predictor();
        p.train(&[ramp_series("s", 30)], &CancelToken::new()).unwrap();

        // Not enough points for a single window + successor.
        let (anomalies, score) = p.score(&ramp_series("s", 8), &CancelToken::new()).unwrap();
        assert!(anomalies.is_empty());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn forecast_requires_training() {
        let p = predictor();
        let err = p.forecast(&ramp_series("s", 30)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn metrics_reflect_state() {
        let mut p = predictor();
        let m = p.metrics();
        assert_eq!(m["trained"], serde_json::json!(false));
        assert_eq!(m["window_size"], serde_json::json!(10));
        assert_eq!(m["hidden_size"], serde_json::json!(5));

        p.train(&[ramp_series("s", 30)], &CancelToken::new()).unwrap();
        assert_eq!(p.metrics()["trained"], serde_json::json!(true));
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(16))]

        #[test]
        fn scores_bounded_for_random_series(
            values in proptest::collection::vec(-1e6f64..1e6, 20..60),
        ) {
            let mut series = TimeSeries::new("prop");
            for (i, v) in values.iter().enumerate() {
                series.push(DataPoint::new(format!("p{}", i), Utc::now(), *v));
            }

            let mut p =
                SequencePredictor::with_seed(PredictorConfig::default(), 99).unwrap();
            let (anomalies, score) = p.score(&series, &CancelToken::new()).unwrap();
            proptest::prop_assert!((0.0..=1.0).contains(&score));
            for a in anomalies {
                proptest::prop_assert!((0.0..=1.0).contains(&a.score));
            }
        }
    }
}
