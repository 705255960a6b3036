//! The item model: what one list position holds.
//!
//! The list displays a heterogeneous sequence: a single synthetic header
//! followed by session rows. [`ListEntry`] is the tagged union covering both,
//! and [`EntryKey`] is its identity key for diffing. Using an enum for the
//! key makes the header sentinel structurally distinct from every session id,
//! so the two can never collide.

use std::sync::Arc;

use crate::diff::DiffItem;
use crate::model::kind::RowKind;
use crate::model::session::SleepSession;

/// Identity key recognizing "the same logical item" across two snapshots,
/// independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// The singleton header.
    Header,
    /// A session, identified by its persistence-layer id.
    Session(i64),
}

/// One position in the displayed sequence.
///
/// Session payloads are shared through `Arc`, so snapshots clone cheaply and
/// the same record can sit in the old and new snapshot during a diff without
/// copying.
#[derive(Debug, Clone)]
pub enum ListEntry {
    /// The synthetic header row.
    Header,
    /// A recorded sleep session.
    Session(Arc<SleepSession>),
}

impl ListEntry {
    /// Builds the displayed sequence for a data emission: the synthetic
    /// header followed by one entry per session, in emission order.
    pub fn from_sessions(sessions: Vec<SleepSession>) -> Vec<ListEntry> {
        let mut entries = Vec::with_capacity(sessions.len() + 1);
        entries.push(ListEntry::Header);
        entries.extend(sessions.into_iter().map(|s| ListEntry::Session(Arc::new(s))));
        entries
    }

    /// The row kind this entry renders as.
    #[inline]
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Header => RowKind::Header,
            Self::Session(_) => RowKind::Session,
        }
    }

    /// The identity key for this entry.
    #[inline]
    pub fn key(&self) -> EntryKey {
        match self {
            Self::Header => EntryKey::Header,
            Self::Session(session) => EntryKey::Session(session.id()),
        }
    }

    /// The session payload, if this is a session row.
    #[inline]
    pub fn session(&self) -> Option<&Arc<SleepSession>> {
        match self {
            Self::Header => None,
            Self::Session(session) => Some(session),
        }
    }
}

impl DiffItem for ListEntry {
    type Key = EntryKey;

    fn identity(&self) -> EntryKey {
        self.key()
    }

    fn content_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Header, Self::Header) => true,
            (Self::Session(a), Self::Session(b)) => a == b,
            _ => false,
        }
    }
}
