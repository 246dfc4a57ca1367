use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::Serialize;

/// Snapshot of a translation run, as served by the progress endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Lock-free progress counter shared between the pipeline and the HTTP layer.
///
/// One tracker lives in the application state; each page run resets it. The
/// cancel flag is observed by the page loop between pages, so cancellation
/// takes effect at the next page boundary.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    current: AtomicUsize,
    total: AtomicUsize,
    cancelled: AtomicBool,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run of `total` pages, clearing any previous state.
    pub fn start(&self, total: usize) {
        self.current.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        self.cancelled.store(false, Ordering::SeqCst);
    }

    pub fn advance(&self, current: usize) {
        self.current.store(current, Ordering::SeqCst);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Progress {
        let current = self.current.load(Ordering::SeqCst);
        let total = self.total.load(Ordering::SeqCst);
        let percentage = if total == 0 {
            0.0
        } else {
            (current as f64 / total as f64 * 10_000.0).round() / 100.0
        };
        Progress {
            current,
            total,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tracker_reports_zero() {
        let tracker = ProgressTracker::new();
        assert_eq!(
            tracker.snapshot(),
            Progress {
                current: 0,
                total: 0,
                percentage: 0.0
            }
        );
    }

    #[test]
    fn percentage_is_rounded_to_two_places() {
        let tracker = ProgressTracker::new();
        tracker.start(3);
        tracker.advance(1);
        assert_eq!(tracker.snapshot().percentage, 33.33);
    }

    #[test]
    fn start_clears_cancel_flag() {
        let tracker = ProgressTracker::new();
        tracker.cancel();
        assert!(tracker.is_cancelled());
        tracker.start(5);
        assert!(!tracker.is_cancelled());
    }
}
