use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GateError {
    /// The waiter was interrupted through its monitor before completion was observed.
    /// Whether loading finished is unknown; the gate itself is left untouched.
    #[error("wait for load completion was interrupted")]
    #[diagnostic(
        code(load_gate::interrupted),
        help("loading status is unknown, either abandon or retry the wait")
    )]
    Interrupted,
    #[error("blocking wait task did not finish")]
    #[diagnostic(code(load_gate::join))]
    Join(#[from] tokio::task::JoinError),
}

impl GateError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
