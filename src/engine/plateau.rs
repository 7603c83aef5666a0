//! engine::plateau
//!
//! Convergence detection over a sliding window of residuals.
//!
//! A plateau is `W` consecutive residuals whose population variance is
//! below a threshold. After a detection the window is cleared, so the next
//! plateau needs `W` fresh samples.

use std::collections::VecDeque;

/// Sliding-window variance detector.
#[derive(Debug, Clone)]
pub struct PlateauDetector {
    window: VecDeque<f64>,
    capacity: usize,
    threshold: f64,
    detections: u32,
}

impl PlateauDetector {
    /// Detector over `capacity` samples with variance `threshold`.
    pub fn new(capacity: usize, threshold: f64) -> Self {
        let capacity = capacity.max(2);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            threshold,
            detections: 0,
        }
    }

    /// Feed a residual. Returns true if this sample completes a plateau.
    pub fn push(&mut self, residual: f64) -> bool {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(residual);
        if self.window.len() < self.capacity {
            return false;
        }
        if self.variance() < self.threshold {
            self.detections += 1;
            self.window.clear();
            return true;
        }
        false
    }

    /// Population variance of the current window.
    pub fn variance(&self) -> f64 {
        let n = self.window.len();
        if n == 0 {
            return 0.0;
        }
        let mean = self.window.iter().sum::<f64>() / n as f64;
        self.window.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n as f64
    }

    /// Plateaus detected so far.
    pub fn detections(&self) -> u32 {
        self.detections
    }
}
