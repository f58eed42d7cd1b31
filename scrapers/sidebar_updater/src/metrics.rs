use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdaterMetrics {
    pub total_cycles: u64,
    pub published_cycles: u64,
    pub skipped_cycles: u64,
    pub avg_cycle_time_ms: f64,
    pub last_cycle_time_ms: u64,
    pub last_error: Option<String>,
    pub last_error_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: Arc<Mutex<UpdaterMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle_start(&self) -> CycleTracker {
        CycleTracker {
            start_time: Instant::now(),
            collector: self.clone(),
        }
    }

    pub fn get_metrics(&self) -> UpdaterMetrics {
        match self.metrics.lock() {
            Ok(metrics) => metrics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update(&self, f: impl FnOnce(&mut UpdaterMetrics)) {
        let mut metrics = match self.metrics.lock() {
            Ok(metrics) => metrics,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut metrics);
    }
}

/// How an update cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Published,
    /// The new sidebar was only logged.
    DryRun,
    Failed(String),
}

/// Measures one update cycle; finish it with the cycle's outcome.
pub struct CycleTracker {
    start_time: Instant,
    collector: MetricsCollector,
}

impl CycleTracker {
    pub fn finish(self, outcome: &CycleOutcome) {
        let duration = self.start_time.elapsed();
        self.collector.update(|metrics| {
            metrics.total_cycles += 1;
            match outcome {
                CycleOutcome::Published => metrics.published_cycles += 1,
                CycleOutcome::DryRun => metrics.skipped_cycles += 1,
                CycleOutcome::Failed(error) => {
                    metrics.skipped_cycles += 1;
                    metrics.last_error = Some(error.clone());
                    metrics.last_error_time = Some(Utc::now());
                }
            }

            let elapsed_ms = duration.as_millis() as u64;
            metrics.last_cycle_time_ms = elapsed_ms;
            // Exponential moving average, seeded by the first cycle.
            let alpha = 0.1;
            metrics.avg_cycle_time_ms = if metrics.total_cycles == 1 {
                elapsed_ms as f64
            } else {
                metrics.avg_cycle_time_ms * (1.0 - alpha) + elapsed_ms as f64 * alpha
            };
        });
    }
}
