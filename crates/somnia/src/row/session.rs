//! The session row: quality label, status color, icon, and sleep length.

use std::any::Any;
use std::sync::Arc;

use crate::error::AdapterError;
use crate::format::{format_sleep_length, quality_label, QualityIcon};
use crate::model::{ListEntry, RowKind, SleepSession};
use crate::row::{palette, IconCell, RowHolder, TextCell};

/// Callback invoked when a session row is tapped.
///
/// Supplied by the hosting screen at adapter construction; invoked exactly
/// once per tap with the tapped record. The holder performs no navigation
/// itself.
pub type SessionTapListener = Arc<dyn Fn(&SleepSession) + Send + Sync>;

/// Holder for one recorded sleep session.
///
/// Holds the widget set of one session row and rebinds it as the slot is
/// recycled. Every bind rewrites the label text, the label color, the icon,
/// and the length text; the color in particular is written on both sides of
/// the alert threshold because a recycled holder may still carry the alert
/// color of an unrelated earlier session.
pub struct SessionHolder {
    quality_label: TextCell,
    sleep_length: TextCell,
    quality_icon: IconCell,
    bound: Option<Arc<SleepSession>>,
    listener: SessionTapListener,
}

impl SessionHolder {
    /// Creates an unbound session holder forwarding taps to `listener`.
    pub fn new(listener: SessionTapListener) -> Self {
        Self {
            quality_label: TextCell::default(),
            sleep_length: TextCell::default(),
            quality_icon: IconCell::default(),
            bound: None,
            listener,
        }
    }

    /// The quality label widget.
    pub fn quality_label(&self) -> &TextCell {
        &self.quality_label
    }

    /// The sleep-length widget.
    pub fn sleep_length(&self) -> &TextCell {
        &self.sleep_length
    }

    /// The quality icon widget.
    pub fn quality_icon(&self) -> &IconCell {
        &self.quality_icon
    }

    /// The currently bound session, if any.
    pub fn bound_session(&self) -> Option<&Arc<SleepSession>> {
        self.bound.as_ref()
    }

    /// A tap on this row.
    ///
    /// Forwards the bound session to the registered listener, once. A tap on
    /// an unbound holder is ignored; the host never surfaces rows it has not
    /// bound.
    pub fn tap(&self) {
        if let Some(session) = &self.bound {
            (self.listener)(session);
        }
    }
}

impl RowHolder for SessionHolder {
    fn kind(&self) -> RowKind {
        RowKind::Session
    }

    fn bind(&mut self, entry: &ListEntry) {
        let session = match entry {
            ListEntry::Session(session) => session,
            other => panic!(
                "{}",
                AdapterError::KindMismatch {
                    holder: RowKind::Session,
                    entry: other.kind(),
                }
            ),
        };

        let quality = session.quality();

        // Written on every bind, both branches: the holder is recycled and
        // may still carry the previous session's alert color.
        self.quality_label.set_color(if quality.is_alert() {
            palette::ALERT
        } else {
            palette::TEXT
        });
        self.quality_label.set_text(quality_label(quality));
        self.sleep_length
            .set_text(format_sleep_length(session.started_at(), session.ended_at()));
        self.quality_icon.set_icon(QualityIcon::for_quality(quality));
        self.bound = Some(session.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
