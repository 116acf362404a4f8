use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Callback invoked with percentage values in `0..=100`.
pub type ProgressSink = Arc<dyn Fn(u8) + Send + Sync>;

/// First value reported as soon as a ticker starts.
pub const INITIAL_PROGRESS: u8 = 5;
/// Synthetic values never exceed this before the operation settles.
pub const TICKER_CEILING: u8 = 90;
/// Value reported exactly once on successful completion.
pub const COMPLETE_PROGRESS: u8 = 100;

const MAX_STEP: f64 = 15.0;

/// Periodic synthetic progress reporter for operations without a real
/// progress signal.
///
/// Reports [`INITIAL_PROGRESS`] immediately, then advances by a random step
/// in `[0, 15)` per tick, capped at [`TICKER_CEILING`]. Reported values are
/// monotonically non-decreasing. Every emission and the settling of the
/// ticker go through one internal lock, so once [`complete`](Self::complete)
/// or [`cancel`](Self::cancel) returns, no further tick can reach the sink.
/// Dropping the ticker cancels it, which keeps the periodic task from
/// leaking on early-return paths.
pub struct ProgressTicker {
    state: Arc<TickerState>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start(interval: Duration, sink: ProgressSink) -> Self {
        let state = Arc::new(TickerState {
            sink,
            inner: Mutex::new(Inner {
                current: f64::from(INITIAL_PROGRESS),
                settled: false,
            }),
        });
        (state.sink)(INITIAL_PROGRESS);

        let task_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; the initial
            // value has already been reported, so skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                task_state.tick();
            }
        });

        Self { state, handle }
    }

    /// Settle successfully: report [`COMPLETE_PROGRESS`] and stop ticking.
    pub fn complete(self) {
        self.state.settle(true);
        self.handle.abort();
    }

    /// Settle without a completion value, used on failure paths.
    pub fn cancel(self) {
        self.state.settle(false);
        self.handle.abort();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.state.settle(false);
        self.handle.abort();
    }
}

struct Inner {
    current: f64,
    settled: bool,
}

struct TickerState {
    sink: ProgressSink,
    inner: Mutex<Inner>,
}

impl TickerState {
    fn tick(&self) {
        let mut inner = self.inner.lock().expect("ticker state poisoned");
        if inner.settled || inner.current >= f64::from(TICKER_CEILING) {
            return;
        }
        let step = rand::thread_rng().gen_range(0.0..MAX_STEP);
        inner.current = (inner.current + step).min(f64::from(TICKER_CEILING));
        (self.sink)(inner.current.round() as u8);
    }

    fn settle(&self, complete: bool) {
        let mut inner = self.inner.lock().expect("ticker state poisoned");
        if inner.settled {
            return;
        }
        inner.settled = true;
        if complete {
            (self.sink)(COMPLETE_PROGRESS);
        }
    }
}
