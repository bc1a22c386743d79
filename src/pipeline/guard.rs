use std::num::NonZeroUsize;

/// Default number of back-to-back transcript failures that stops a run
pub const DEFAULT_MAX_FAILURES: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// Counts consecutive fetch failures and reports when the threshold is reached
#[derive(Debug, Clone)]
pub struct FailureGuard {
    threshold: NonZeroUsize,
    consecutive: usize,
}

impl FailureGuard {
    pub fn new(threshold: NonZeroUsize) -> Self {
        Self { threshold, consecutive: 0 }
    }

    /// Resets the streak
    pub fn on_success(&mut self) {
        self.consecutive = 0;
    }

    /// Records a failure; returns `true` once the streak has reached the threshold
    #[must_use]
    pub fn on_failure(&mut self) -> bool {
        self.consecutive = self.consecutive.saturating_add(1);
        self.is_tripped()
    }

    fn is_tripped(&self) -> bool {
        self.consecutive >= self.threshold.get()
    }

    pub fn consecutive_failures(&self) -> usize {
        self.consecutive
    }
}

impl Default for FailureGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILURES)
    }
}
