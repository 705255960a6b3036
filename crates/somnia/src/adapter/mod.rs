//! The list adapter: snapshot owner and change broadcaster.
//!
//! `SessionListAdapter` sits between the data source and the layout host. It
//! owns the one live [`ListEntry`] snapshot, turns each submitted sequence of
//! sessions into a headered snapshot, diffs it against the previous one, and
//! broadcasts the resulting positional changes through [`AdapterSignals`].
//! The host reads rows lazily through `count`/`kind_at`/`entry_at` and
//! requests holders only for the slots it realizes; off-screen rows are never
//! materialized.
//!
//! There is no wholesale invalidation path: every change the host hears about
//! comes out of the diff engine, row by row.

mod pool;

pub use pool::{HolderFactory, HolderPool};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use somnia_core::logging::targets;
use somnia_core::Signal;

use crate::diff::{diff, EditOp};
use crate::error::{AdapterError, Result};
use crate::model::{ListEntry, RowKind, SleepSession};
use crate::row::{HeaderHolder, RowHolder, SessionHolder, SessionTapListener};

/// Positional change notifications emitted after each snapshot transition.
///
/// Slots observe the snapshot already in its new state: `count()` and
/// `entry_at()` reflect the submitted sequence while the script's positions
/// stream out. Payloads carry positions only; row data is read lazily at bind
/// time.
pub struct AdapterSignals {
    /// Emitted once per inserted row, with its position in the sequence at
    /// the moment the insert applies.
    pub rows_inserted: Signal<usize>,
    /// Emitted once per removed row, with the position it occupied when the
    /// removal applies.
    pub rows_removed: Signal<usize>,
    /// Emitted once per displaced row. Args: (from, to), where `to` is the
    /// reinsertion index after the removal at `from`.
    pub rows_moved: Signal<(usize, usize)>,
    /// Emitted once per row whose identity survived but whose content
    /// changed, with its final position.
    pub data_changed: Signal<usize>,
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            rows_removed: Signal::new(),
            rows_moved: Signal::new(),
            data_changed: Signal::new(),
        }
    }
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an ordered sequence of sleep sessions to a bounded pool of reusable
/// row holders, with diff-driven minimal change notification.
///
/// The adapter starts empty (`count() == 0`) and becomes populated on the
/// first [`submit`](Self::submit); from then on the snapshot always carries
/// the synthetic header, even when the submitted sequence is empty.
pub struct SessionListAdapter {
    snapshot: Mutex<Vec<ListEntry>>,
    pending: Mutex<VecDeque<Vec<ListEntry>>>,
    applying: AtomicBool,
    signals: AdapterSignals,
    pool: HolderPool,
}

impl SessionListAdapter {
    /// Creates an adapter forwarding session-row taps to `tap_listener`.
    ///
    /// The holder factory table is registered here, once: one factory per
    /// [`RowKind`].
    pub fn new(tap_listener: SessionTapListener) -> Self {
        let pool = HolderPool::new();
        pool.register(RowKind::Header, Box::new(|| Box::new(HeaderHolder::new())));
        pool.register(
            RowKind::Session,
            Box::new(move || Box::new(SessionHolder::new(tap_listener.clone()))),
        );

        Self {
            snapshot: Mutex::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            applying: AtomicBool::new(false),
            signals: AdapterSignals::new(),
            pool,
        }
    }

    /// Replaces the displayed sequence.
    ///
    /// `None` and an empty vector both mean "no data yet" and yield a
    /// headered empty list. Submissions serialize: each one fully resolves
    /// (diff + notify) before the next is processed, in arrival order, and
    /// none are dropped. A submit arriving from inside a change-notification
    /// slot is queued and applied right after the in-flight transition.
    pub fn submit(&self, sessions: Option<Vec<SleepSession>>) {
        let entries = ListEntry::from_sessions(sessions.unwrap_or_default());
        self.pending.lock().push_back(entries);

        if self.applying.swap(true, Ordering::SeqCst) {
            // A transition is in flight; its drain loop picks this one up.
            return;
        }

        loop {
            let next = self.pending.lock().pop_front();
            match next {
                Some(entries) => self.apply_transition(entries),
                None => {
                    self.applying.store(false, Ordering::SeqCst);
                    // A submit landing between the final pop and the flag
                    // reset must not strand in the queue.
                    if self.pending.lock().is_empty()
                        || self.applying.swap(true, Ordering::SeqCst)
                    {
                        break;
                    }
                }
            }
        }
    }

    fn apply_transition(&self, new_snapshot: Vec<ListEntry>) {
        let script = {
            let mut snapshot = self.snapshot.lock();
            let script = diff(&snapshot, &new_snapshot);
            *snapshot = new_snapshot;
            script
        };

        tracing::debug!(
            target: targets::ADAPTER,
            rows = self.count(),
            ops = script.len(),
            "applied snapshot transition"
        );

        // The snapshot lock is released before any slot runs.
        for op in script.into_ops() {
            match op {
                EditOp::Remove { at } => self.signals.rows_removed.emit(at),
                EditOp::Move { from, to } => self.signals.rows_moved.emit((from, to)),
                EditOp::Insert { at, .. } => self.signals.rows_inserted.emit(at),
                EditOp::Update { at, .. } => self.signals.data_changed.emit(at),
            }
        }
    }

    /// Current total row count, including the header once populated.
    pub fn count(&self) -> usize {
        self.snapshot.lock().len()
    }

    /// The entry at `position`, or an error if out of bounds.
    pub fn try_entry_at(&self, position: usize) -> Result<ListEntry> {
        let snapshot = self.snapshot.lock();
        snapshot
            .get(position)
            .cloned()
            .ok_or_else(|| AdapterError::out_of_bounds(position, snapshot.len()))
    }

    /// The entry at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of `[0, count)`.
    pub fn entry_at(&self, position: usize) -> ListEntry {
        self.try_entry_at(position)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// The row kind at `position`, or an error if out of bounds.
    pub fn try_kind_at(&self, position: usize) -> Result<RowKind> {
        self.try_entry_at(position).map(|entry| entry.kind())
    }

    /// The row kind at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of `[0, count)`.
    pub fn kind_at(&self, position: usize) -> RowKind {
        self.entry_at(position).kind()
    }

    /// The view-type tag at `position`, for the layout host's dispatch table.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of `[0, count)`.
    pub fn view_type_at(&self, position: usize) -> u32 {
        self.kind_at(position).tag()
    }

    /// How many grid units the row at `position` spans.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of `[0, count)`.
    pub fn span_at(&self, position: usize) -> u32 {
        self.kind_at(position).grid_span()
    }

    /// Allocates a new unbound holder for the given view-type tag.
    ///
    /// # Panics
    ///
    /// Panics if no row kind claims `tag`. That is a registry/dispatch
    /// mismatch introduced at build time; it is reported immediately, never
    /// retried.
    pub fn create_holder(&self, tag: u32) -> Box<dyn RowHolder> {
        match RowKind::from_tag(tag) {
            Some(kind) => self.pool.create(kind),
            None => {
                let error = AdapterError::unknown_row_kind(tag);
                tracing::error!(target: targets::ADAPTER, %error, "holder creation failed");
                panic!("{}", error);
            }
        }
    }

    /// Binds the entry at `position` into `holder`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds, or if the entry's kind differs
    /// from the holder's.
    pub fn bind(&self, holder: &mut dyn RowHolder, position: usize) {
        let entry = self.entry_at(position);
        holder.bind(&entry);
    }

    /// The change-notification signals.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// The holder factory pool.
    pub fn pool(&self) -> &HolderPool {
        &self.pool
    }
}
