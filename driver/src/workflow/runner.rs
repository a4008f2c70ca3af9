use crate::generator::operands::OperandGenerator;
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use crate::workflow::checks::{self, TrialOutcome};
use crate::workflow::config::{OperationKind, WorkflowConfig};
use anyhow::Context;
use arithkernel::prelude::ElementKind;
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::{Builder as TokioBuilder, Runtime};

/// Aggregated outcome of every trial of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: OperationKind,
    pub element_kind: ElementKind,
    pub trials: usize,
    /// Trials whose residual exceeded the tolerance.
    pub failures: usize,
    /// Trials where the kernel or a check returned an error.
    pub errors: usize,
    pub mean_micros: f64,
    pub max_residual: f64,
}

impl OperationReport {
    pub fn passed(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub seed: u64,
    pub size: usize,
    pub concurrent: bool,
    pub reports: Vec<OperationReport>,
    pub metrics: Metrics,
}

impl WorkflowResult {
    pub fn failed_operations(&self) -> Vec<OperationKind> {
        self.reports
            .iter()
            .filter(|report| !report.passed())
            .map(|report| report.operation)
            .collect()
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        self.config.validate()?;
        let logger = LogManager::new("runner");

        let runtime = if self.config.concurrent {
            let runtime = TokioBuilder::new_multi_thread()
                .enable_all()
                .build()
                .context("creating runtime for concurrent trials")?;
            Some(runtime)
        } else {
            None
        };

        let mut reports = Vec::with_capacity(self.config.operations.len());
        for &operation in &self.config.operations {
            let outcomes = match runtime.as_ref() {
                Some(runtime) => self.run_concurrent(runtime, operation)?,
                None => (0..self.config.trials)
                    .map(|trial| self.run_trial(operation, trial))
                    .collect(),
            };

            let report = self.summarize(operation, outcomes, &logger);
            logger.record(&format!(
                "{} x{}: mean {:.1}us, max residual {:.3e}, failures {}, errors {}",
                report.operation,
                report.trials,
                report.mean_micros,
                report.max_residual,
                report.failures,
                report.errors
            ));
            reports.push(report);
        }

        Ok(WorkflowResult {
            seed: self.config.seed,
            size: self.config.size,
            concurrent: self.config.concurrent,
            reports,
            metrics: self.metrics.snapshot(),
        })
    }

    fn run_trial(&self, operation: OperationKind, trial: usize) -> anyhow::Result<TrialOutcome> {
        let mut generator = OperandGenerator::for_trial(self.config.seed, trial);
        let size = self.config.size;
        let outcome = match self.config.element_kind {
            ElementKind::Integer => checks::run::<i64>(operation, &mut generator, size),
            ElementKind::Float => checks::run::<f64>(operation, &mut generator, size),
        }
        .with_context(|| format!("{} trial {}", operation, trial));

        match &outcome {
            Ok(result) => self
                .metrics
                .record_operation(result.elapsed, result.residual <= self.config.tolerance),
            Err(_) => self.metrics.record_error(),
        }
        outcome
    }

    // Trials of one operation run side by side on the blocking pool.
    fn run_concurrent(
        &self,
        runtime: &Runtime,
        operation: OperationKind,
    ) -> anyhow::Result<Vec<anyhow::Result<TrialOutcome>>> {
        runtime.block_on(async {
            let handles: Vec<_> = (0..self.config.trials)
                .map(|trial| {
                    let runner = self.clone();
                    tokio::task::spawn_blocking(move || runner.run_trial(operation, trial))
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for handle in handles {
                outcomes.push(handle.await.context("joining trial task")?);
            }
            Ok::<_, anyhow::Error>(outcomes)
        })
    }

    fn summarize(
        &self,
        operation: OperationKind,
        outcomes: Vec<anyhow::Result<TrialOutcome>>,
        logger: &LogManager,
    ) -> OperationReport {
        let trials = outcomes.len();
        let mut completed = Vec::with_capacity(trials);
        let mut errors = 0;
        for outcome in outcomes {
            match outcome {
                Ok(result) => completed.push(result),
                Err(err) => {
                    errors += 1;
                    logger.alert(&format!("{:#}", err));
                }
            }
        }

        let failures = completed
            .iter()
            .filter(|result| result.residual > self.config.tolerance)
            .count();
        let total_micros: f64 = completed
            .iter()
            .map(|result| result.elapsed.as_secs_f64() * 1e6)
            .sum();
        let mean_micros = if completed.is_empty() {
            0.0
        } else {
            total_micros / completed.len() as f64
        };
        let max_residual = completed
            .iter()
            .map(|result| result.residual)
            .fold(0.0, f64::max);

        if failures > 0 {
            logger.alert(&format!(
                "{}: {} of {} trials exceeded tolerance {:e}",
                operation, failures, trials, self.config.tolerance
            ));
        }

        OperationReport {
            operation,
            element_kind: self.config.element_kind,
            trials,
            failures,
            errors,
            mean_micros,
            max_residual,
        }
    }
}
