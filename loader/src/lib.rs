#![warn(clippy::complexity)]
#![warn(clippy::correctness)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]

pub mod error;
pub mod preloader;
pub mod run;

pub use error::LoaderError;
pub use preloader::{LoadStatus, Preloader};
pub use run::{run_load, spawn_load};
