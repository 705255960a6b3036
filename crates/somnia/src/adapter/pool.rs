//! The per-kind holder factory pool.
//!
//! Holder construction is dispatched through factories registered once at
//! adapter construction, one per [`RowKind`]. The layout host asks for
//! holders by kind as slots scroll into view; nothing is created for rows
//! that never become visible.

use std::collections::HashMap;

use parking_lot::Mutex;

use somnia_core::logging::targets;

use crate::model::RowKind;
use crate::row::RowHolder;

/// A factory producing fresh, unbound holders for one row kind.
pub type HolderFactory = Box<dyn Fn() -> Box<dyn RowHolder> + Send + Sync>;

/// Factory table and creation accounting, keyed by row kind.
pub struct HolderPool {
    factories: Mutex<HashMap<RowKind, HolderFactory>>,
    created: Mutex<HashMap<RowKind, usize>>,
}

impl HolderPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            factories: Mutex::new(HashMap::new()),
            created: Mutex::new(HashMap::new()),
        }
    }

    /// Registers the factory for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if a factory for `kind` is already registered: the table is
    /// populated once at construction, and a second registration indicates
    /// wiring run twice.
    pub fn register(&self, kind: RowKind, factory: HolderFactory) {
        let previous = self.factories.lock().insert(kind, factory);
        if previous.is_some() {
            panic!("holder factory for {:?} registered twice", kind);
        }
    }

    /// Whether a factory for `kind` has been registered.
    pub fn has_factory(&self, kind: RowKind) -> bool {
        self.factories.lock().contains_key(&kind)
    }

    /// Creates a new unbound holder for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if no factory is registered for `kind`. That is a fatal
    /// configuration error: the registry and the factory table were extended
    /// out of step.
    pub fn create(&self, kind: RowKind) -> Box<dyn RowHolder> {
        let factories = self.factories.lock();
        let factory = factories.get(&kind).unwrap_or_else(|| {
            tracing::error!(target: targets::POOL, ?kind, "no holder factory registered");
            panic!("no holder factory registered for {:?}", kind);
        });
        let holder = factory();
        drop(factories);

        let mut created = self.created.lock();
        let count = created.entry(kind).or_insert(0);
        *count += 1;
        tracing::trace!(target: targets::POOL, ?kind, total = *count, "created holder");
        holder
    }

    /// How many holders have been created for `kind` so far.
    pub fn created_count(&self, kind: RowKind) -> usize {
        self.created.lock().get(&kind).copied().unwrap_or(0)
    }
}

impl Default for HolderPool {
    fn default() -> Self {
        Self::new()
    }
}
