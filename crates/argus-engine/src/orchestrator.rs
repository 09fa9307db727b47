//! The scoring orchestrator: runs the statistical and predictive paths,
//! fuses their verdicts under one threshold policy, and owns the
//! engine's lifecycle and background tasks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use argus_types::{AnalysisResult, DataPoint, FusedResult, ModelKind, TimeSeries};

use crate::cancel::CancelToken;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::metrics::EngineMetrics;
use crate::predictor::{PredictorConfig, PredictorOptions, SequencePredictor};
use crate::statistical::StatisticalAnalyzer;

/// Normal band for feature values; values outside it contribute an
/// amplified deviation penalty to the statistical score.
const NORMAL_BAND: (f64, f64) = (0.4, 0.6);

type ModelMap = HashMap<String, SequencePredictor>;

/// Accepts data-point batches, always runs the statistical path,
/// conditionally runs the predictive path, and fuses the two into one
/// per-point verdict.
///
/// Lifecycle is explicit: [`start`](Self::start) spawns the background
/// model-refresh and metrics tasks, [`stop`](Self::stop) aborts them.
/// Model and metrics state follow a read-many/write-one discipline;
/// the running flag is atomic.
pub struct ScoringOrchestrator {
    config: EngineConfig,
    analyzer: Arc<StatisticalAnalyzer>,
    models: Arc<RwLock<ModelMap>>,
    running: Arc<AtomicBool>,
    latest_metrics: Arc<RwLock<EngineMetrics>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ScoringOrchestrator {
    /// Create a stopped orchestrator. Fails eagerly on invalid
    /// configuration.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let initial = EngineMetrics {
            running: false,
            model_count: 0,
            threshold: config.threshold,
            window_size: config.window_size,
            ml_enabled: config.enable_ml,
            captured_at: Utc::now(),
            models: HashMap::new(),
        };
        Ok(Self {
            config,
            analyzer: Arc::new(StatisticalAnalyzer::with_defaults()),
            models: Arc::new(RwLock::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
            latest_metrics: Arc::new(RwLock::new(initial)),
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Create an orchestrator with default configuration.
    pub fn with_defaults() -> Self {
        // Default configuration always validates.
        match Self::new(EngineConfig::default()) {
            Ok(orchestrator) => orchestrator,
            Err(_) => unreachable!("default configuration is valid"),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Start the engine and its background tasks. Returns
    /// `AlreadyRunning` when called twice without an intervening stop.
    pub async fn start(&self) -> EngineResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(EngineError::AlreadyRunning);
        }
        info!(
            threshold = self.config.threshold,
            ml_enabled = self.config.enable_ml,
            "starting scoring engine"
        );

        snapshot_metrics(
            &self.models,
            &self.running,
            &self.config,
            &self.latest_metrics,
        );

        let mut tasks = lock_tasks(&self.tasks);
        tasks.push(self.spawn_refresh_task());
        tasks.push(self.spawn_metrics_task());
        Ok(())
    }

    /// Stop the engine and abort its background tasks. Returns
    /// `NotRunning` when the engine is not started.
    pub fn stop(&self) -> EngineResult<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err(EngineError::NotRunning);
        }
        for task in lock_tasks(&self.tasks).drain(..) {
            task.abort();
        }
        info!("scoring engine stopped");
        Ok(())
    }

    fn spawn_refresh_task(&self) -> JoinHandle<()> {
        let models = Arc::clone(&self.models);
        let latest = Arc::clone(&self.latest_metrics);
        let interval = self.config.update_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let refreshed: HashMap<_, _> = read_guard(&models)
                    .iter()
                    .map(|(name, model)| (name.clone(), model.metrics()))
                    .collect();
                let count = refreshed.len();
                write_guard(&latest).models = refreshed;
                debug!(model_count = count, "refreshed predictive model state");
            }
        })
    }

    fn spawn_metrics_task(&self) -> JoinHandle<()> {
        let models = Arc::clone(&self.models);
        let running = Arc::clone(&self.running);
        let latest = Arc::clone(&self.latest_metrics);
        let config = self.config.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.update_interval);
            loop {
                ticker.tick().await;
                snapshot_metrics(&models, &running, &config, &latest);
                debug!("metrics snapshot captured");
            }
        })
    }

    // ── Model registry ──────────────────────────────────────────────

    /// Register a predictor built from the engine configuration.
    pub fn register_model(&self, name: &str) -> EngineResult<()> {
        let predictor = SequencePredictor::new(PredictorConfig {
            window_size: self.config.window_size,
            sensitivity: self.config.sensitivity,
            ..PredictorConfig::default()
        })?;
        self.insert_model(name, predictor)
    }

    /// Register a caller-constructed predictor (custom configuration or
    /// fixed seed).
    pub fn insert_model(&self, name: &str, predictor: SequencePredictor) -> EngineResult<()> {
        let mut models = write_guard(&self.models);
        if models.contains_key(name) {
            return Err(EngineError::InvalidInput(format!(
                "model '{}' is already registered",
                name
            )));
        }
        info!(model = name, "registered predictive model");
        models.insert(name.to_string(), predictor);
        Ok(())
    }

    /// Remove a registered model.
    pub fn remove_model(&self, name: &str) -> EngineResult<()> {
        let mut models = write_guard(&self.models);
        match models.remove(name) {
            Some(mut predictor) => {
                predictor.close();
                info!(model = name, "removed predictive model");
                Ok(())
            }
            None => Err(EngineError::ModelNotFound(name.to_string())),
        }
    }

    /// Train a registered model on the given series batch.
    pub fn train_model(
        &self,
        name: &str,
        batch: &[TimeSeries],
        cancel: &CancelToken,
    ) -> EngineResult<()> {
        let mut models = write_guard(&self.models);
        let model = models
            .get_mut(name)
            .ok_or_else(|| EngineError::ModelNotFound(name.to_string()))?;
        model.train(batch, cancel)
    }

    /// Reconfigure a registered model.
    pub fn configure_model(&self, name: &str, options: &PredictorOptions) -> EngineResult<()> {
        let mut models = write_guard(&self.models);
        let model = models
            .get_mut(name)
            .ok_or_else(|| EngineError::ModelNotFound(name.to_string()))?;
        model.configure(options)
    }

    /// Names of the registered models.
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read_guard(&self.models).keys().cloned().collect();
        names.sort();
        names
    }

    // ── Scoring ─────────────────────────────────────────────────────

    /// Analyze a raw text sample through the statistical analyzer.
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        self.analyzer.analyze(text)
    }

    /// Score a batch of data points.
    ///
    /// Results come back in input order. The statistical path always
    /// runs; the predictive path runs when enabled and at least one
    /// model is registered (untrained models bootstrap from the batch).
    /// A predictive failure degrades to statistical-only scoring rather
    /// than failing the call.
    pub fn detect(&self, points: &[DataPoint]) -> EngineResult<Vec<FusedResult>> {
        if !self.is_running() {
            return Err(EngineError::NotRunning);
        }
        if points.is_empty() {
            return Err(EngineError::InvalidInput("empty data point batch".into()));
        }

        let started = Instant::now();

        if points.len() < self.config.min_data_points {
            let reason = format!(
                "batch of {} below minimum of {} points",
                points.len(),
                self.config.min_data_points
            );
            debug!(%reason, "detect short-circuited");
            return Ok(points
                .iter()
                .map(|p| FusedResult {
                    is_anomaly: false,
                    score: 0.0,
                    confidence: 0.0,
                    timestamp: p.timestamp,
                    features: p.features.clone(),
                    model_used: ModelKind::Statistical,
                    processing: started.elapsed(),
                    reason: Some(reason.clone()),
                })
                .collect());
        }

        let predictive = if self.config.enable_ml {
            self.predictive_scores(points)
        } else {
            HashMap::new()
        };

        let threshold = self.config.threshold;
        let results = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let statistical = feature_band_score(&point.features);
                let (score, confidence, model_used) = match predictive.get(&i) {
                    Some(&p) if p > 0.0 => {
                        let score = (statistical + p) / 2.0;
                        let confidence =
                            (path_confidence(statistical, threshold) + path_confidence(p, threshold))
                                / 2.0;
                        (score, confidence, ModelKind::Hybrid)
                    }
                    _ => (
                        statistical,
                        path_confidence(statistical, threshold),
                        ModelKind::Statistical,
                    ),
                };

                let score = (score * self.config.sensitivity).clamp(0.0, 1.0);
                FusedResult {
                    is_anomaly: score > threshold,
                    score,
                    confidence: confidence.clamp(0.0, 1.0),
                    timestamp: point.timestamp,
                    features: point.features.clone(),
                    model_used,
                    processing: started.elapsed(),
                    reason: None,
                }
            })
            .collect();

        Ok(results)
    }

    /// Latest metrics snapshot, refreshed on demand. The background
    /// metrics task refreshes the same slot periodically.
    pub fn metrics(&self) -> EngineMetrics {
        snapshot_metrics(
            &self.models,
            &self.running,
            &self.config,
            &self.latest_metrics,
        );
        read_guard(&self.latest_metrics).clone()
    }

    // ── Private: predictive path ────────────────────────────────────

    /// Per-point predictive scores for the batch, keyed by point index.
    ///
    /// Untrained models bootstrap on the batch under the write lock;
    /// scoring itself runs against frozen weights under the read lock so
    /// concurrent `detect` calls can forecast in parallel.
    fn predictive_scores(&self, points: &[DataPoint]) -> HashMap<usize, f64> {
        if read_guard(&self.models).is_empty() {
            return HashMap::new();
        }

        let series = batch_series(points);
        let cancel = CancelToken::new();

        let needs_bootstrap = read_guard(&self.models)
            .values()
            .any(|m| !m.is_trained());
        if needs_bootstrap {
            let mut models = write_guard(&self.models);
            for (name, model) in models.iter_mut() {
                if !model.is_trained() {
                    match model.train(std::slice::from_ref(&series), &cancel) {
                        Ok(()) => info!(model = %name, "model bootstrapped from detect batch"),
                        Err(e) => {
                            warn!(model = %name, error = %e, "model bootstrap failed");
                        }
                    }
                }
            }
        }

        let mut scores: HashMap<usize, f64> = HashMap::new();
        let models = read_guard(&self.models);
        let mut names: Vec<&String> = models.keys().collect();
        names.sort();
        for name in names {
            // Bootstrap may have failed above; skip models still cold.
            if !models[name].is_trained() {
                continue;
            }
            match models[name].forecast(&series) {
                Ok((anomalies, _)) => {
                    for anomaly in anomalies {
                        if let Some(index) = anomaly
                            .metadata
                            .get("point_index")
                            .and_then(|v| v.as_u64())
                        {
                            let entry = scores.entry(index as usize).or_insert(0.0);
                            *entry = entry.max(anomaly.score);
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        model = %name,
                        error = %e,
                        "predictive scoring failed; continuing with statistical path"
                    );
                }
            }
        }
        scores
    }
}

impl Drop for ScoringOrchestrator {
    fn drop(&mut self) {
        for task in lock_tasks(&self.tasks).drain(..) {
            task.abort();
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Statistical per-point score: average amplified deviation of feature
/// values outside the normal band, each clamped to [0, 1].
fn feature_band_score(features: &HashMap<String, f64>) -> f64 {
    if features.is_empty() {
        return 0.0;
    }
    let total: f64 = features
        .values()
        .map(|v| {
            let v = v.clamp(0.0, 1.0);
            if v < NORMAL_BAND.0 || v > NORMAL_BAND.1 {
                ((v - 0.5).abs() * 2.0).min(1.0)
            } else {
                0.0
            }
        })
        .sum();
    total / features.len() as f64
}

/// Single-path confidence: distance from the decision boundary.
fn path_confidence(score: f64, threshold: f64) -> f64 {
    (0.5 + 0.5 * (score - threshold).abs()).min(1.0)
}

/// Assemble the batch into a series for the predictive path.
fn batch_series(points: &[DataPoint]) -> TimeSeries {
    let name = points
        .first()
        .and_then(|p| p.labels.get("source").cloned())
        .unwrap_or_else(|| "batch".to_string());
    TimeSeries {
        name,
        points: points.to_vec(),
    }
}

/// Capture a full metrics snapshot into the shared slot.
fn snapshot_metrics(
    models: &RwLock<ModelMap>,
    running: &AtomicBool,
    config: &EngineConfig,
    slot: &RwLock<EngineMetrics>,
) {
    let models = read_guard(models);
    let snapshot = EngineMetrics {
        running: running.load(Ordering::SeqCst),
        model_count: models.len(),
        threshold: config.threshold,
        window_size: config.window_size,
        ml_enabled: config.enable_ml,
        captured_at: Utc::now(),
        models: models
            .iter()
            .map(|(name, model)| (name.clone(), model.metrics()))
            .collect(),
    };
    drop(models);
    *write_guard(slot) = snapshot;
}

// Poisoning only occurs if a holder panicked; the data is plain state,
// so recover the guard and continue.
fn read_guard<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_guard<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock_tasks(tasks: &Mutex<Vec<JoinHandle<()>>>) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
    tasks.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_types::DataPoint;
    use chrono::Utc;

    use crate::config::EngineOptions;

    /// Batch of n points with every feature set to the same value.
    fn flat_batch(n: usize, feature_value: f64) -> Vec<DataPoint> {
        (0..n)
            .map(|i| {
                let mut p = DataPoint::new(format!("p{}", i), Utc::now(), i as f64);
                p.features.insert("signal".into(), feature_value);
                p
            })
            .collect()
    }

    /// Batch of n points with feature values alternating 0.0 / 1.0.
    fn alternating_batch(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| {
                let mut p = DataPoint::new(format!("p{}", i), Utc::now(), i as f64);
                p.features
                    .insert("signal".into(), if i % 2 == 0 { 0.0 } else { 1.0 });
                p
            })
            .collect()
    }

    /// Ramp-valued batch for the predictive path.
    fn ramp_batch(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| {
                let mut p = DataPoint::new(format!("p{}", i), Utc::now(), i as f64);
                p.features.insert("signal".into(), 0.5);
                p
            })
            .collect()
    }

    fn ramp_series(name: &str, n: usize) -> TimeSeries {
        TimeSeries {
            name: name.into(),
            points: (0..n)
                .map(|i| DataPoint::new(format!("p{}", i), Utc::now(), i as f64))
                .collect(),
        }
    }

    #[test]
    fn detect_requires_running() {
        let engine = ScoringOrchestrator::with_defaults();
        let err = engine.detect(&flat_batch(20, 0.5)).unwrap_err();
        assert!(matches!(err, EngineError::NotRunning));
    }

    #[tokio::test]
    async fn lifecycle_errors_on_misuse() {
        let engine = ScoringOrchestrator::with_defaults();

        engine.start().await.unwrap();
        assert!(engine.is_running());
        assert!(matches!(
            engine.start().await.unwrap_err(),
            EngineError::AlreadyRunning
        ));

        engine.stop().unwrap();
        assert!(!engine.is_running());
        assert!(matches!(engine.stop().unwrap_err(), EngineError::NotRunning));
    }

    #[tokio::test]
    async fn detect_rejects_empty_batch() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();
        assert!(matches!(
            engine.detect(&[]).unwrap_err(),
            EngineError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn small_batch_short_circuits_with_reason() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();

        let results = engine.detect(&flat_batch(3, 0.9)).unwrap();
        assert_eq!(results.len(), 3);
        for r in &results {
            assert!(!r.is_anomaly);
            assert_eq!(r.score, 0.0);
            assert!(r.reason.as_deref().unwrap().contains("below minimum"));
        }
    }

    #[tokio::test]
    async fn centered_features_score_zero() {
        // Feature values dead center of the normal band.
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();

        let results = engine.detect(&flat_batch(20, 0.5)).unwrap();
        assert_eq!(results.len(), 20);
        for r in &results {
            assert!(!r.is_anomaly);
            assert_eq!(r.score, 0.0);
            assert_eq!(r.model_used, ModelKind::Statistical);
        }
    }

    #[tokio::test]
    async fn extreme_features_are_anomalous() {
        // Feature values alternating 0.0 / 1.0: every point maximally
        // deviant.
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();

        let results = engine.detect(&alternating_batch(20)).unwrap();
        assert_eq!(results.len(), 20);
        for r in &results {
            assert!(r.score > 0.0);
            assert!(r.is_anomaly, "score {} should exceed threshold", r.score);
        }
    }

    #[tokio::test]
    async fn results_preserve_input_order() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();

        let batch = alternating_batch(20);
        let results = engine.detect(&batch).unwrap();
        for (point, result) in batch.iter().zip(&results) {
            assert_eq!(point.timestamp, result.timestamp);
            assert_eq!(point.features, result.features);
        }
    }

    #[tokio::test]
    async fn disabled_ml_always_labels_statistical() {
        // Disabled through the configuration collaborator's option bag.
        let config = EngineConfig::default()
            .with_options(&EngineOptions {
                enable_ml: Some(false),
                ..EngineOptions::default()
            })
            .unwrap();
        let engine = ScoringOrchestrator::new(config).unwrap();
        engine.start().await.unwrap();

        engine
            .insert_model(
                "seq",
                SequencePredictor::with_seed(PredictorConfig::default(), 11).unwrap(),
            )
            .unwrap();
        engine
            .train_model("seq", &[ramp_series("s", 40)], &CancelToken::new())
            .unwrap();

        let results = engine.detect(&ramp_batch(25)).unwrap();
        assert!(results
            .iter()
            .all(|r| r.model_used == ModelKind::Statistical));
    }

    #[tokio::test]
    async fn hybrid_label_when_predictive_fires() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();

        let predictor = SequencePredictor::with_seed(
            PredictorConfig {
                threshold: 0.2,
                ..PredictorConfig::default()
            },
            42,
        )
        .unwrap();
        engine.insert_model("seq", predictor).unwrap();
        engine
            .train_model("seq", &[ramp_series("s", 40)], &CancelToken::new())
            .unwrap();

        // Ramp batch with one collapsed value the model will not expect.
        let mut batch = ramp_batch(25);
        batch[20].value = serde_json::json!(0.0);

        let results = engine.detect(&batch).unwrap();
        assert_eq!(results.len(), 25);
        assert!(
            results.iter().any(|r| r.model_used == ModelKind::Hybrid),
            "collapsed point should be fused as hybrid"
        );
        // Points without a predictive signal stay statistical.
        assert!(results
            .iter()
            .any(|r| r.model_used == ModelKind::Statistical));
    }

    #[tokio::test]
    async fn predictive_failure_degrades_to_statistical() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.start().await.unwrap();
        engine.register_model("seq").unwrap();

        // 12 points clears min_data_points but is below the 2x window
        // bootstrap requirement, so the predictive path fails and the
        // batch still scores statistically.
        let results = engine.detect(&flat_batch(12, 0.5)).unwrap();
        assert_eq!(results.len(), 12);
        assert!(results
            .iter()
            .all(|r| r.model_used == ModelKind::Statistical));
    }

    #[tokio::test]
    async fn model_registry_operations() {
        let engine = ScoringOrchestrator::with_defaults();

        engine.register_model("a").unwrap();
        engine.register_model("b").unwrap();
        assert_eq!(engine.model_names(), vec!["a".to_string(), "b".to_string()]);

        assert!(matches!(
            engine.register_model("a").unwrap_err(),
            EngineError::InvalidInput(_)
        ));

        engine.remove_model("a").unwrap();
        assert!(matches!(
            engine.remove_model("a").unwrap_err(),
            EngineError::ModelNotFound(_)
        ));
        assert!(matches!(
            engine
                .train_model("missing", &[ramp_series("s", 40)], &CancelToken::new())
                .unwrap_err(),
            EngineError::ModelNotFound(_)
        ));
    }

    #[tokio::test]
    async fn configure_model_applies_options() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.register_model("seq").unwrap();

        engine
            .configure_model(
                "seq",
                &PredictorOptions {
                    threshold: Some(0.25),
                    ..PredictorOptions::default()
                },
            )
            .unwrap();

        assert!(matches!(
            engine
                .configure_model("missing", &PredictorOptions::default())
                .unwrap_err(),
            EngineError::ModelNotFound(_)
        ));
    }

    #[tokio::test]
    async fn metrics_reflect_engine_state() {
        let engine = ScoringOrchestrator::with_defaults();
        engine.register_model("seq").unwrap();

        let m = engine.metrics();
        assert!(!m.running);
        assert_eq!(m.model_count, 1);
        assert!(m.ml_enabled);
        assert_eq!(m.models["seq"]["trained"], serde_json::json!(false));

        engine.start().await.unwrap();
        assert!(engine.metrics().running);

        engine.stop().unwrap();
        assert!(!engine.metrics().running);
    }

    #[test]
    fn feature_band_scoring() {
        let mut features = HashMap::new();
        features.insert("a".to_string(), 0.5);
        assert_eq!(feature_band_score(&features), 0.0);

        features.insert("b".to_string(), 1.0);
        // (0 + 1.0) / 2
        assert!((feature_band_score(&features) - 0.5).abs() < 1e-12);

        // Values are clamped before banding.
        features.insert("c".to_string(), 17.0);
        assert!(feature_band_score(&features) <= 1.0);

        assert_eq!(feature_band_score(&HashMap::new()), 0.0);
    }

    #[test]
    fn boundary_confidence_is_lowest() {
        // Points at the decision boundary report 0.5; far points near 1.
        assert!((path_confidence(0.5, 0.5) - 0.5).abs() < 1e-12);
        assert!(path_confidence(1.0, 0.5) > path_confidence(0.6, 0.5));
        assert!(path_confidence(0.0, 0.5) > path_confidence(0.4, 0.5));
        assert!(path_confidence(1.0, 0.0) <= 1.0);
    }

    #[tokio::test]
    async fn analyze_text_delegates_to_analyzer() {
        let engine = ScoringOrchestrator::with_defaults();
        let result = engine.analyze_text("aaaaaaaaaa");
        assert!(result.score > 0.5);

        let empty = engine.analyze_text("");
        assert_eq!(empty.score, 0.0);
        assert_eq!(empty.confidence, 0.0);
    }
}
