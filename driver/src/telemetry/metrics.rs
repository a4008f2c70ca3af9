use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;

/// Thread-safe tally of kernel calls made by the driver.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub operations: usize,
    pub failures: usize,
    pub errors: usize,
    pub kernel_micros: u128,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_operation(&self, elapsed: Duration, passed: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.operations += 1;
            metrics.kernel_micros += elapsed.as_micros();
            if !passed {
                metrics.failures += 1;
            }
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn recorder_counts_across_threads() {
        let recorder = Arc::new(MetricsRecorder::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let recorder = recorder.clone();
                thread::spawn(move || {
                    recorder.record_operation(Duration::from_micros(10), i % 2 == 0)
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        recorder.record_error();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.operations, 4);
        assert_eq!(snapshot.failures, 2);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.kernel_micros, 40);
    }
}
