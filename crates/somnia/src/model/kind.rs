//! The registry of row kinds the list can display.
//!
//! Every entry in the list maps to exactly one [`RowKind`], and every kind
//! maps to a stable integer tag used by the layout host for view-type
//! dispatch. The kind also decides how many grid units a row spans.
//!
//! `RowKind` is a closed enum: adding a kind means extending the enum, the
//! [`ListEntry`](super::ListEntry) union, and the holder factory table
//! together, with the compiler checking every `match` for exhaustiveness.

/// Number of columns in the hosting grid layout.
///
/// The header spans all of them; session rows occupy one each.
pub const GRID_COLUMNS: u32 = 3;

/// Distinguishes structurally different row layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// The single header row at the top of the list.
    Header,
    /// One recorded sleep session.
    Session,
}

impl RowKind {
    /// All kinds the registry knows, in tag order.
    pub const ALL: [RowKind; 2] = [RowKind::Header, RowKind::Session];

    /// The stable view-type tag for this kind.
    ///
    /// Tags index the layout host's view-type dispatch table and must never
    /// change meaning between releases.
    #[inline]
    pub const fn tag(self) -> u32 {
        match self {
            Self::Header => 0,
            Self::Session => 1,
        }
    }

    /// Resolves a view-type tag back to its kind.
    ///
    /// Returns `None` for tags no kind claims; callers treat that as a fatal
    /// configuration error, not a recoverable condition.
    #[inline]
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Header),
            1 => Some(Self::Session),
            _ => None,
        }
    }

    /// How many grid units a row of this kind occupies.
    #[inline]
    pub const fn grid_span(self) -> u32 {
        match self {
            Self::Header => GRID_COLUMNS,
            Self::Session => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in RowKind::ALL {
            assert_eq!(RowKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_tag_resolves_to_none() {
        assert_eq!(RowKind::from_tag(2), None);
        assert_eq!(RowKind::from_tag(u32::MAX), None);
    }

    #[test]
    fn test_header_spans_full_width() {
        assert_eq!(RowKind::Header.grid_span(), GRID_COLUMNS);
        assert_eq!(RowKind::Session.grid_span(), 1);
    }
}
