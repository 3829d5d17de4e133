//! Time-driven progress estimation for the submission pipeline.
//!
//! The emitted value is feedback, not measurement: it climbs linearly
//! with wall-clock time toward 100 over a target duration, decoupled
//! from how far extraction or the network call actually got. The owning
//! operation must stop the estimator on every exit path; the handle's
//! `Drop` impl backstops that so no timer outlives its operation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::trace;

/// Tick cadence for progress emission.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Receives simulated progress values in the range 0–100.
pub trait ProgressObserver: Send + Sync {
    fn progress(&self, percent: u8);
}

/// Observer that discards progress (headless callers).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressObserver;

impl ProgressObserver for NullProgressObserver {
    fn progress(&self, _percent: u8) {}
}

/// Starts and owns simulated-progress timers.
pub struct ProgressEstimator;

impl ProgressEstimator {
    /// Starts a timer that emits linear progress to `observer` every
    /// 50 ms until it reaches 100 or the handle is stopped.
    ///
    /// A zero `target` emits 100 on the first tick.
    #[must_use]
    pub fn start(target: Duration, observer: Arc<dyn ProgressObserver>) -> ProgressHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run_ticker(
            target,
            Arc::clone(&observer),
            Arc::clone(&stopped),
        ));
        ProgressHandle {
            stopped,
            observer,
            task,
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
async fn run_ticker(target: Duration, observer: Arc<dyn ProgressObserver>, stopped: Arc<AtomicBool>) {
    let ticks = (target.as_millis() / TICK_INTERVAL.as_millis()).max(1) as f64;
    let increment = 100.0 / ticks;
    let mut current = 0.0_f64;

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick of a tokio interval completes immediately; consume it so
    // emission starts one interval after start().
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if stopped.load(Ordering::SeqCst) {
            break;
        }
        current += increment;
        if current >= 100.0 {
            observer.progress(100);
            stopped.store(true, Ordering::SeqCst);
            break;
        }
        observer.progress(current as u8);
        trace!(percent = current as u8, "simulated progress tick");
    }
}

/// Handle to a running progress timer.
///
/// `stop` and `complete` are idempotent in any order; dropping the
/// handle stops the timer.
pub struct ProgressHandle {
    stopped: Arc<AtomicBool>,
    observer: Arc<dyn ProgressObserver>,
    task: tokio::task::JoinHandle<()>,
}

impl ProgressHandle {
    /// Stops the timer without emitting a final value.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Emits 100 and stops the timer; no-op if already stopped.
    pub fn complete(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            self.observer.progress(100);
        }
    }

    /// Whether the timer has been stopped (explicitly or by reaching 100).
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.stop();
        self.task.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        samples: Mutex<Vec<u8>>,
    }

    impl ProgressObserver for Recorder {
        fn progress(&self, percent: u8) {
            self.samples.lock().unwrap().push(percent);
        }
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_reaches_100() {
        let recorder = Arc::new(Recorder::default());
        let handle = ProgressEstimator::start(Duration::from_millis(300), recorder.clone());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(handle.is_stopped(), "timer should stop at 100 on its own");

        let samples = recorder.samples.lock().unwrap();
        assert!(!samples.is_empty());
        assert_eq!(*samples.last().unwrap(), 100);
        assert!(
            samples.windows(2).all(|pair| pair[0] <= pair[1]),
            "progress must never decrease: {samples:?}"
        );
        assert!(samples.iter().all(|&p| p <= 100));
    }

    #[tokio::test]
    async fn test_stop_halts_emission() {
        let recorder = Arc::new(Recorder::default());
        let handle = ProgressEstimator::start(Duration::from_secs(60), recorder.clone());

        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let count = recorder.samples.lock().unwrap().len();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(
            recorder.samples.lock().unwrap().len(),
            count,
            "no emission after stop"
        );
        assert!(
            recorder.samples.lock().unwrap().iter().all(|&p| p < 100),
            "stop must not emit a final 100"
        );
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let recorder = Arc::new(Recorder::default());
        let handle = ProgressEstimator::start(Duration::from_secs(60), recorder);

        handle.stop();
        handle.stop();
        handle.complete();

        assert!(handle.is_stopped());
    }

    #[tokio::test]
    async fn test_complete_emits_final_100_exactly_once() {
        let recorder = Arc::new(Recorder::default());
        let handle = ProgressEstimator::start(Duration::from_secs(60), recorder.clone());

        handle.complete();
        handle.complete();

        let samples = recorder.samples.lock().unwrap();
        assert_eq!(
            samples.iter().filter(|&&p| p == 100).count(),
            1,
            "complete must emit 100 once: {samples:?}"
        );
    }

    #[tokio::test]
    async fn test_drop_stops_the_timer() {
        let recorder = Arc::new(Recorder::default());
        let handle = ProgressEstimator::start(Duration::from_secs(60), recorder.clone());
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let count = recorder.samples.lock().unwrap().len();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(recorder.samples.lock().unwrap().len(), count);
    }
}
