// #![warn(clippy::pedantic)]

// #![warn(clippy::nursery)]
// #![warn(clippy::cargo)]
#![warn(clippy::complexity)]
#![warn(clippy::correctness)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]

// #![warn(clippy::unwrap_used)]
// #![warn(clippy::expect_used)]

mod bridge;
pub mod config;
pub mod error;
pub mod gate;
pub mod listener;
pub mod monitor;

#[cfg(test)]
mod testing;

pub use config::{GateConfig, NotifyPolicy, WaitPolicy};
pub use error::GateError;
pub use gate::{GateState, LoadCompletionGate};
pub use listener::DataLoadListener;
pub use monitor::Monitor;
