//! Core systems for Somnia.
//!
//! This crate provides the foundational components of the Somnia list core:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use somnia_core::Signal;
//!
//! // Create a signal that notifies when a row changes
//! let row_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = row_changed.connect(|position| {
//!     println!("Row {} changed", position);
//! });
//!
//! // Emit the signal
//! row_changed.emit(2);
//!
//! // Disconnect when done
//! row_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
