use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::debug;

use crate::error::GateError;

/// Shared wait/notify handle injected into gates.
///
/// Wakes are handed out as tokens, one per notified waiter, so a waiter never
/// returns without a matching `notify_*` or `interrupt`. A notify with nobody
/// waiting is dropped. An interrupt with nobody waiting stays pending until
/// the next `wait`.
#[derive(Debug, Default)]
pub struct Monitor {
    state: Mutex<MonitorState>,
    cond: Condvar,
}

#[derive(Debug, Default)]
struct MonitorState {
    waiters: usize,
    wakeups: usize,
    interrupted: bool,
}

impl MonitorState {
    fn take_interrupt(&mut self) -> bool {
        std::mem::take(&mut self.interrupted)
    }

    fn leave(&mut self) {
        self.waiters -= 1;
        self.wakeups = self.wakeups.min(self.waiters);
    }
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until woken by `notify_one`/`notify_all` or interrupted.
    pub fn wait(&self) -> Result<(), GateError> {
        let mut state = self.state.lock();
        self.park(&mut state)
    }

    /// Blocks while `condition` holds. The condition is evaluated with the
    /// monitor locked, before the first wait and after every wake.
    pub fn wait_while<F>(&self, mut condition: F) -> Result<(), GateError>
    where
        F: FnMut() -> bool,
    {
        let mut state = self.state.lock();
        while condition() {
            self.park(&mut state)?;
        }
        Ok(())
    }

    pub fn notify_one(&self) {
        let mut state = self.state.lock();
        if state.wakeups < state.waiters {
            state.wakeups += 1;
            self.cond.notify_one();
        }
        debug!(waiters = state.waiters, "notify one");
    }

    pub fn notify_all(&self) {
        let mut state = self.state.lock();
        state.wakeups = state.waiters;
        self.cond.notify_all();
        debug!(waiters = state.waiters, "notify all");
    }

    /// Makes the next (or current) waiter fail with [`GateError::Interrupted`].
    ///
    /// The interrupt belongs to the monitor, not to a thread: whichever waiter
    /// on any gate sharing this monitor parks first receives it.
    pub fn interrupt(&self) {
        let mut state = self.state.lock();
        state.interrupted = true;
        self.cond.notify_all();
        debug!(waiters = state.waiters, "interrupt");
    }

    pub fn is_interrupted(&self) -> bool {
        self.state.lock().interrupted
    }

    /// Drops a pending interrupt. Returns whether one was pending.
    pub fn clear_interrupt(&self) -> bool {
        self.state.lock().take_interrupt()
    }

    /// Number of threads currently blocked on this monitor.
    pub fn waiters(&self) -> usize {
        self.state.lock().waiters
    }

    fn park(&self, state: &mut MutexGuard<'_, MonitorState>) -> Result<(), GateError> {
        if state.take_interrupt() {
            return Err(GateError::Interrupted);
        }

        state.waiters += 1;
        loop {
            self.cond.wait(state);

            if state.take_interrupt() {
                state.leave();
                return Err(GateError::Interrupted);
            }
            if state.wakeups > 0 {
                state.wakeups -= 1;
                state.leave();
                return Ok(());
            }
            // interrupt already consumed by another waiter
        }
    }
}
