//! Error types for the list core.

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors surfaced by the adapter's checked accessors.
///
/// Every variant is a programmer error: a caller holding a stale position, a
/// view-type tag no kind claims, or a holder bound across kinds. The
/// unchecked accessor variants panic with the same messages instead of
/// returning them; nothing here is a recoverable runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// A position query outside `[0, count)`.
    #[error("position {position} out of bounds for a list of {count} rows")]
    PositionOutOfBounds { position: usize, count: usize },

    /// The layout host requested a holder for a tag the registry cannot
    /// resolve. Indicates a registry/dispatch mismatch introduced at build
    /// time; fatal, never retried.
    #[error("no row kind is registered for view-type tag {tag}")]
    UnknownRowKind { tag: u32 },

    /// A holder created for one kind was asked to bind an entry of another.
    #[error("a {holder:?} holder cannot bind a {entry:?} entry")]
    KindMismatch {
        holder: crate::model::RowKind,
        entry: crate::model::RowKind,
    },
}

impl AdapterError {
    /// Create a position error.
    pub fn out_of_bounds(position: usize, count: usize) -> Self {
        Self::PositionOutOfBounds { position, count }
    }

    /// Create an unknown-tag error.
    pub fn unknown_row_kind(tag: u32) -> Self {
        Self::UnknownRowKind { tag }
    }
}
