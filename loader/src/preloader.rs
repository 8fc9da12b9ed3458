use std::{fmt::Debug, hash::Hash, sync::Arc};

use color_eyre::Result;
use dashmap::{mapref::entry::Entry, DashMap};
use load_gate_core::{GateConfig, LoadCompletionGate, Monitor};
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::{error::LoaderError, run::spawn_load};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    /// The load ended with an error, kept as its message. A new `load` retries.
    Failed(String),
}

/// One load attempt. The worker and every waiter share `status`, so the
/// outcome they see is the one of this attempt even if the key is reloaded.
#[derive(Debug, Clone)]
struct Slot {
    gate: Arc<LoadCompletionGate>,
    status: Arc<Mutex<LoadStatus>>,
}

impl Slot {
    fn pending() -> Self {
        Self {
            gate: Arc::new(LoadCompletionGate::with_config(
                Arc::new(Monitor::new()),
                GateConfig::broadcast(),
            )),
            status: Arc::new(Mutex::new(LoadStatus::Pending)),
        }
    }

    fn status(&self) -> LoadStatus {
        self.status.lock().clone()
    }
}

/// Tracks background loads by key so callers can ask whether a key is loaded
/// or pending, and block until it is done.
///
/// Every key gets its own monitor and a broadcasting gate, so any number of
/// threads may wait on the same key.
#[derive(Debug)]
pub struct Preloader<K>
where
    K: Eq + Hash,
{
    slots: Arc<DashMap<K, Slot>>,
}

impl<K> Clone for Preloader<K>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<K> Default for Preloader<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
        }
    }
}

impl<K> Preloader<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading `key` on a background thread.
    ///
    /// If the key is already pending or loaded nothing is started and the
    /// existing gate is returned. A failed key is loaded again.
    #[instrument(skip(self, work))]
    pub fn load<T, F>(&self, key: K, work: F) -> Result<Arc<LoadCompletionGate>, LoaderError>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let slot = Slot::pending();
        match self.slots.entry(key.clone()) {
            Entry::Occupied(mut entry) => match entry.get().status() {
                status @ (LoadStatus::Pending | LoadStatus::Loaded) => {
                    debug!(?status, "already requested");
                    return Ok(entry.get().gate.clone());
                }
                LoadStatus::Failed(_) => {
                    debug!("retrying failed load");
                    entry.insert(slot.clone());
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(slot.clone());
            }
        }

        let name = format!("preload {key:?}");
        let status = slot.status.clone();
        let spawned = spawn_load(slot.gate.clone(), name, move || {
            let res = work();
            // recorded before the gate opens so woken waiters see the outcome
            *status.lock() = match &res {
                Ok(_) => LoadStatus::Loaded,
                Err(err) => LoadStatus::Failed(err.to_string()),
            };
            res.map(|_| ())
        });

        match spawned {
            Ok(_) => Ok(slot.gate),
            Err(err) => {
                self.abandon(&key, &slot, &err);
                Err(err.into())
            }
        }
    }

    /// Fails an attempt that never got a worker. Anyone who already picked up
    /// its gate is released, then the slot is dropped unless it was replaced.
    fn abandon(&self, key: &K, slot: &Slot, err: &std::io::Error) {
        warn!(%err, "could not start load");
        *slot.status.lock() = LoadStatus::Failed(err.to_string());
        slot.gate.end();
        self.slots
            .remove_if(key, |_, current| Arc::ptr_eq(&current.gate, &slot.gate));
    }

    pub fn status(&self, key: &K) -> Option<LoadStatus> {
        self.slots.get(key).map(|slot| slot.status())
    }

    pub fn is_loaded(&self, key: &K) -> bool {
        matches!(self.status(key), Some(LoadStatus::Loaded))
    }

    pub fn is_pending(&self, key: &K) -> bool {
        matches!(self.status(key), Some(LoadStatus::Pending))
    }

    /// Error message of the last load of `key`, if it failed.
    pub fn failure(&self, key: &K) -> Option<String> {
        match self.status(key)? {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Blocks until the load of `key` that is current at call time has ended
    /// and returns its outcome.
    pub fn wait(&self, key: &K) -> Result<LoadStatus, LoaderError> {
        let slot = self
            .slots
            .get(key)
            .map(|slot| slot.value().clone())
            .ok_or_else(|| LoaderError::UnknownKey {
                key: format!("{key:?}"),
            })?;

        slot.gate.wait_until_done()?;
        Ok(slot.status())
    }
}
