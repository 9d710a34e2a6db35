//! Rolling-mean baseline of a limb's deviation from vertical.

use std::collections::VecDeque;

/// Fixed-capacity moving average over the most recent deviation samples
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTracker {
    capacity: usize,
    window: VecDeque<f64>,
    value: Option<f64>,
}

impl BaselineTracker {
    /// Create an empty tracker holding at most `capacity` samples
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Window size must be greater than 0");
        Self {
            capacity,
            window: VecDeque::with_capacity(capacity + 1),
            value: None,
        }
    }

    /// Push a sample, evicting the oldest once full, and return the new mean
    pub fn update(&mut self, sample: f64) -> f64 {
        self.window.push_back(sample);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }

        let mean = self.window.iter().sum::<f64>() / self.window.len() as f64;
        self.value = Some(mean);
        mean
    }

    /// Current mean, `None` before the first sample
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in arrival order, oldest first
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.window.iter().copied()
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.value = None;
    }
}
