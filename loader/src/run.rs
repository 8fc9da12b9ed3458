use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use color_eyre::Result;
use load_gate_core::DataLoadListener;
use tracing::{instrument, warn};

/// Runs `work` between `data_loading_begin` and `data_loading_end`.
///
/// The end notification is sent even if `work` fails.
#[instrument(skip_all)]
pub fn run_load<L, T, F>(listener: &L, work: F) -> Result<T>
where
    L: DataLoadListener + ?Sized,
    F: FnOnce() -> Result<T>,
{
    listener.data_loading_begin();
    let res = work();
    if let Err(err) = &res {
        warn!(%err, "data load failed");
    }
    listener.data_loading_end();
    res
}

/// [`run_load`] on a new thread called `name`.
pub fn spawn_load<L, T, F>(
    listener: Arc<L>,
    name: impl Into<String>,
    work: F,
) -> std::io::Result<JoinHandle<Result<T>>>
where
    L: DataLoadListener + ?Sized + 'static,
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    thread::Builder::new()
        .name(name.into())
        .spawn(move || run_load(&*listener, work))
}
