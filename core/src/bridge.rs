//! Waiting on a gate from async code.

use std::sync::Arc;

use tracing::debug;

use crate::{error::GateError, gate::LoadCompletionGate};

impl LoadCompletionGate {
    /// Same as [`wait_until_done`](Self::wait_until_done), but parks on tokio's
    /// blocking pool instead of the calling runtime worker.
    ///
    /// Dropping the returned future does not stop the wait: the pool thread
    /// stays parked until the gate ends or its monitor is interrupted.
    pub async fn wait_until_done_async(self: Arc<Self>) -> Result<(), GateError> {
        if self.is_done() {
            return Ok(());
        }

        debug!("handing wait over to blocking pool");
        tokio::task::spawn_blocking(move || self.wait_until_done()).await?
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{config::GateConfig, monitor::Monitor};

    use super::*;

    #[tokio::test]
    async fn completed_gate_resolves_immediately() {
        let gate = Arc::new(LoadCompletionGate::new(Arc::new(Monitor::new())));
        gate.end();

        gate.wait_until_done_async().await.expect("not interrupted");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn resolves_when_loading_ends() {
        let gate = Arc::new(LoadCompletionGate::with_config(
            Arc::new(Monitor::new()),
            GateConfig::broadcast(),
        ));

        let waits: Vec<_> = (0..3)
            .map(|_| tokio::spawn(gate.clone().wait_until_done_async()))
            .collect();

        let producer = gate.clone();
        tokio::task::spawn_blocking(move || {
            producer.begin();
            std::thread::sleep(Duration::from_millis(20));
            producer.end();
        });

        for wait in waits {
            tokio::time::timeout(Duration::from_secs(5), wait)
                .await
                .expect("wait timed out")
                .expect("task panicked")
                .expect("not interrupted");
        }
        assert!(gate.is_done());
    }

    #[tokio::test]
    async fn dead_task_surfaces_as_join_error() {
        let join_err = tokio::spawn(async { panic!("blocking wait died") })
            .await
            .expect_err("task panics");

        let err = GateError::from(join_err);
        assert!(matches!(err, GateError::Join(ref inner) if inner.is_panic()));
        assert!(!err.is_interrupted());
        assert_eq!(
            miette::Diagnostic::code(&err).map(|code| code.to_string()),
            Some("load_gate::join".to_owned())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn interruption_surfaces_as_error() {
        let gate = Arc::new(LoadCompletionGate::new(Arc::new(Monitor::new())));
        let wait = tokio::spawn(gate.clone().wait_until_done_async());

        while gate.monitor().waiters() == 0 {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        gate.monitor().interrupt();

        let res = tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("wait timed out")
            .expect("task panicked");
        assert!(matches!(res, Err(GateError::Interrupted)));
        assert!(!gate.is_done());
    }
}
