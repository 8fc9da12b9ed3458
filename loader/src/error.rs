use load_gate_core::GateError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LoaderError {
    #[error("no load was ever started for {key}")]
    #[diagnostic(
        code(load_gate::loader::unknown_key),
        help("call `Preloader::load` for this key first")
    )]
    UnknownKey { key: String },
    #[error("could not start load thread")]
    #[diagnostic(code(load_gate::loader::spawn))]
    Spawn(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Gate(#[from] GateError),
}
