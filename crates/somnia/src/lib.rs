//! Somnia: the list core of a sleep-tracking screen.
//!
//! This crate implements the adapter/diff/recycling contract behind a
//! scrollable list of recorded sleep sessions with a header row:
//!
//! - **Model**: [`SleepSession`] records, the [`ListEntry`] tagged union one
//!   list position holds, and the closed [`RowKind`] registry with stable
//!   view-type tags and grid spans
//! - **Diff Engine**: [`diff`] computes the minimal positional edit script
//!   between two snapshots, matching rows by identity key
//! - **Adapter**: [`SessionListAdapter`] owns the live snapshot, applies each
//!   submission as diff-driven change notifications, and hands out row
//!   holders through a per-kind factory pool
//! - **Row Holders**: [`HeaderHolder`] and [`SessionHolder`], the reusable
//!   widget sets a layout host binds per visible row
//! - **Controller**: [`SleepTrackerController`] wires the observable data
//!   source to the adapter and surfaces row taps as navigation requests
//!
//! # Example
//!
//! ```
//! use somnia::{RowKind, SessionSource, SleepQuality, SleepSession, SleepTrackerController};
//! use somnia_core::Signal;
//! use chrono::{Duration, TimeZone, Utc};
//! use std::sync::Arc;
//!
//! let controller = SleepTrackerController::new();
//! let source: Arc<SessionSource> = Arc::new(Signal::new());
//! controller.attach_source(source.clone());
//!
//! // The persistence layer emits a new sequence; the adapter diffs and
//! // notifies whatever view is attached.
//! let start = Utc.with_ymd_and_hms(2024, 3, 4, 22, 0, 0).unwrap();
//! source.emit(Some(vec![SleepSession::new(
//!     1,
//!     SleepQuality::Rated(4),
//!     start,
//!     start + Duration::hours(8),
//! )]));
//!
//! let adapter = controller.adapter();
//! assert_eq!(adapter.count(), 2); // header + one session
//! assert_eq!(adapter.kind_at(0), RowKind::Header);
//!
//! // The layout host realizes a slot and binds it.
//! let mut holder = adapter.create_holder(adapter.view_type_at(1));
//! adapter.bind(holder.as_mut(), 1);
//! ```

pub mod adapter;
pub mod diff;
pub mod error;
pub mod format;
pub mod model;
pub mod row;
pub mod tracker;

pub use adapter::{AdapterSignals, HolderFactory, HolderPool, SessionListAdapter};
pub use diff::{diff, DiffItem, EditOp, EditScript};
pub use error::{AdapterError, Result};
pub use format::{format_sleep_length, quality_label, QualityIcon, QUALITY_PLACEHOLDER};
pub use model::{EntryKey, ListEntry, RowKind, SleepQuality, SleepSession, GRID_COLUMNS};
pub use row::{
    palette, Color, HeaderHolder, IconCell, RowHolder, SessionHolder, SessionTapListener, TextCell,
};
pub use tracker::{SessionSource, SleepTrackerController};
