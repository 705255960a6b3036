//! The static header row.

use std::any::Any;

use crate::error::AdapterError;
use crate::model::{ListEntry, RowKind};
use crate::row::{RowHolder, TextCell};

/// Holder for the header row at the top of the list.
///
/// The header has no data-derived fields; its layout is static. `bind` only
/// enforces the kind contract.
#[derive(Debug)]
pub struct HeaderHolder {
    title: TextCell,
}

impl HeaderHolder {
    /// Creates a header holder with its static title.
    pub fn new() -> Self {
        let mut title = TextCell::default();
        title.set_text("Sleep Results");
        Self { title }
    }

    /// The static title text.
    pub fn title(&self) -> &TextCell {
        &self.title
    }
}

impl Default for HeaderHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl RowHolder for HeaderHolder {
    fn kind(&self) -> RowKind {
        RowKind::Header
    }

    fn bind(&mut self, entry: &ListEntry) {
        if entry.kind() != RowKind::Header {
            panic!(
                "{}",
                AdapterError::KindMismatch {
                    holder: RowKind::Header,
                    entry: entry.kind(),
                }
            );
        }
        // Static layout: nothing to write.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
