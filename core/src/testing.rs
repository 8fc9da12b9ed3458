use std::{thread, time::Duration};

use crate::monitor::Monitor;

/// Spins until exactly `n` threads are parked on `monitor`.
pub(crate) fn wait_for_waiters(monitor: &Monitor, n: usize) {
    for _ in 0..2500 {
        if monitor.waiters() == n {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("expected {n} waiters, found {}", monitor.waiters());
}
