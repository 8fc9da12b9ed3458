use std::sync::Arc;

use derive_more::Display;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{
    config::{GateConfig, NotifyPolicy, WaitPolicy},
    error::GateError,
    listener::DataLoadListener,
    monitor::Monitor,
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateState {
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "completed")]
    Completed,
}

/// Lets one thread block until another announces that loading has finished.
///
/// `done` lives behind the gate's own lock and only ever goes from `false` to
/// `true`. Blocking and waking happen on the injected [`Monitor`], which may be
/// shared with other parties. The gate lock is never held while blocking.
#[derive(Debug)]
pub struct LoadCompletionGate {
    done: Mutex<bool>,
    monitor: Arc<Monitor>,
    config: GateConfig,
}

impl LoadCompletionGate {
    pub fn new(monitor: Arc<Monitor>) -> Self {
        Self::with_config(monitor, GateConfig::default())
    }

    pub fn with_config(monitor: Arc<Monitor>, config: GateConfig) -> Self {
        Self {
            done: Mutex::new(false),
            monitor,
            config,
        }
    }

    /// Marks the start of loading. Has no effect on the gate.
    pub fn begin(&self) {
        trace!("data loading begin");
    }

    /// Marks loading as finished and wakes waiters according to the
    /// configured [`NotifyPolicy`]. Calling it again is harmless.
    pub fn end(&self) {
        *self.done.lock() = true;

        debug!(notify = ?self.config.notify, "data loading end");
        match self.config.notify {
            NotifyPolicy::One => self.monitor.notify_one(),
            NotifyPolicy::All => self.monitor.notify_all(),
        }
    }

    /// Blocks until [`end`](Self::end) has been called.
    ///
    /// Returns at once if loading already ended. Fails with
    /// [`GateError::Interrupted`] when the monitor is interrupted while
    /// blocked; `done` is left as it was.
    pub fn wait_until_done(&self) -> Result<(), GateError> {
        if self.is_done() {
            return Ok(());
        }

        debug!(wait = ?self.config.wait, "waiting for data loading end");
        let res = match self.config.wait {
            // Lost-wakeup window: an `end` between the check above and this
            // wait is missed.
            WaitPolicy::SingleWake => self.monitor.wait(),
            WaitPolicy::UntilDone => self.monitor.wait_while(|| !self.is_done()),
        };

        if let Err(err) = &res {
            warn!(%err, done = self.is_done(), "wait for data loading end aborted");
        }
        res
    }

    pub fn is_done(&self) -> bool {
        *self.done.lock()
    }

    pub fn state(&self) -> GateState {
        if self.is_done() {
            GateState::Completed
        } else {
            GateState::Pending
        }
    }

    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }

    pub fn config(&self) -> GateConfig {
        self.config
    }
}

impl DataLoadListener for LoadCompletionGate {
    fn data_loading_begin(&self) {
        self.begin()
    }

    fn data_loading_end(&self) {
        self.end()
    }
}
