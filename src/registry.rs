//! Descriptor registry
//!
//! Foreign callers never hold algorithm objects directly. They hold a
//! [`Descriptor`], a small positive integer, and every call goes through the
//! registry to reach the instance behind it.

use crate::algorithm::OnlineClust;
use crate::errors::{DistclusError, Result};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, trace};

/// Handle to a registered algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Descriptor(pub i32);

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Descriptor> for i32 {
    fn from(descr: Descriptor) -> i32 {
        descr.0
    }
}

/// Shared, lockable algorithm instance
pub type AlgoHandle = Arc<Mutex<Box<dyn OnlineClust>>>;

/// Table of live algorithm instances.
///
/// Descriptors start at 1, only grow, and are never handed out twice, so a
/// stale descriptor can never reach a newer algorithm.
pub struct AlgorithmRegistry {
    table: RwLock<FxHashMap<Descriptor, AlgoHandle>>,
    next: AtomicI32,
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self {
            table: RwLock::new(FxHashMap::default()),
            next: AtomicI32::new(1),
        }
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("descriptors", &self.descriptors())
            .finish()
    }
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an algorithm and return its new descriptor
    pub fn register(&self, algo: Box<dyn OnlineClust>) -> Result<Descriptor> {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        if id <= 0 {
            return Err(DistclusError::internal("descriptor space exhausted"));
        }
        let descr = Descriptor(id);

        self.table.write()?.insert(descr, Arc::new(Mutex::new(algo)));
        debug!(descr = descr.0, "registered algorithm");
        Ok(descr)
    }

    /// Look up an algorithm
    pub fn get(&self, descr: Descriptor) -> Option<AlgoHandle> {
        let table = self.table.read().ok()?;
        table.get(&descr).cloned()
    }

    /// Remove an algorithm, returning it if it was registered
    pub fn unregister(&self, descr: Descriptor) -> Option<AlgoHandle> {
        let removed = self.table.write().ok()?.remove(&descr);
        if removed.is_some() {
            debug!(descr = descr.0, "unregistered algorithm");
        } else {
            trace!(descr = descr.0, "unregister of unknown descriptor");
        }
        removed
    }

    /// Lock the algorithm behind `descr` and run `f` on it
    pub fn with_algorithm<T>(
        &self,
        descr: Descriptor,
        f: impl FnOnce(&mut dyn OnlineClust) -> Result<T>,
    ) -> Result<T> {
        let handle = self
            .get(descr)
            .ok_or_else(|| DistclusError::unknown_descriptor(descr.0))?;
        let mut algo = handle.lock()?;
        f(algo.as_mut())
    }

    /// Number of registered algorithms
    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered descriptors in ascending order
    pub fn descriptors(&self) -> Vec<Descriptor> {
        let mut descrs: Vec<Descriptor> = match self.table.read() {
            Ok(table) => table.keys().copied().collect(),
            Err(_) => Vec::new(),
        };
        descrs.sort_unstable();
        descrs
    }
}
