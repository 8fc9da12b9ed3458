use serde::{Deserialize, Serialize};

/// How `wait_until_done` behaves once the fast path saw the load still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitPolicy {
    /// Block on the monitor once and return on the first wake.
    ///
    /// `done` is not re-checked after waking, so an unrelated notify on a shared
    /// monitor is taken as completion. A notify that fires between the `done`
    /// check and the wait is lost and the waiter blocks until the next one.
    SingleWake,
    /// Re-check `done` under the monitor lock and keep waiting until it is set.
    #[default]
    UntilDone,
}

/// How many waiters `end` wakes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    #[default]
    One,
    /// Required when several threads wait on the same gate, or when a monitor
    /// is shared between gates.
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub wait: WaitPolicy,
    pub notify: NotifyPolicy,
}

impl GateConfig {
    /// Parity mode: single wake, single notify.
    pub fn single_wake() -> Self {
        Self {
            wait: WaitPolicy::SingleWake,
            notify: NotifyPolicy::One,
        }
    }

    /// Any number of waiters, each returning only once the load is done.
    pub fn broadcast() -> Self {
        Self {
            wait: WaitPolicy::UntilDone,
            notify: NotifyPolicy::All,
        }
    }
}
