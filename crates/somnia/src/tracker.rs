//! Controller wiring for the sleep-tracker screen.
//!
//! `SleepTrackerController` owns the adapter and connects it to its two
//! collaborators: the observable data source on one side, and the hosting
//! screen's navigation on the other. Session emissions flow straight into
//! [`SessionListAdapter::submit`]; row taps surface as the
//! [`navigate_to_detail`](SleepTrackerController::navigate_to_detail) signal
//! carrying the tapped session's id. The controller performs no navigation
//! itself; the hosting screen decides what a detail request means.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use somnia_core::logging::targets;
use somnia_core::{ConnectionId, Signal};

use crate::adapter::SessionListAdapter;
use crate::model::SleepSession;
use crate::row::SessionTapListener;

/// The observable stream of session emissions the persistence layer exposes.
///
/// `None` means "no data yet" and renders as a headered empty list.
pub type SessionSource = Signal<Option<Vec<SleepSession>>>;

/// Owns the list adapter and routes data and taps between collaborators.
pub struct SleepTrackerController {
    adapter: Arc<SessionListAdapter>,
    /// Emitted once per session-row tap, with the tapped session's id.
    pub navigate_to_detail: Signal<i64>,
    source: Mutex<Option<(Arc<SessionSource>, ConnectionId)>>,
}

impl SleepTrackerController {
    /// Creates the controller and its adapter.
    ///
    /// The adapter's tap listener is wired back to this controller through a
    /// weak reference, so dropping the controller tears the route down with
    /// it.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<SleepTrackerController>| {
            let route = weak.clone();
            let listener: SessionTapListener = Arc::new(move |session| {
                if let Some(controller) = route.upgrade() {
                    tracing::trace!(
                        target: targets::TRACKER,
                        session_id = session.id(),
                        "session tapped"
                    );
                    controller.navigate_to_detail.emit(session.id());
                }
            });

            SleepTrackerController {
                adapter: Arc::new(SessionListAdapter::new(listener)),
                navigate_to_detail: Signal::new(),
                source: Mutex::new(None),
            }
        })
    }

    /// The adapter this controller feeds.
    pub fn adapter(&self) -> &Arc<SessionListAdapter> {
        &self.adapter
    }

    /// Subscribes the adapter to `source`, replacing any previous
    /// subscription.
    ///
    /// Every emission is forwarded to [`SessionListAdapter::submit`] in
    /// arrival order.
    pub fn attach_source(&self, source: Arc<SessionSource>) {
        let adapter = self.adapter.clone();
        let id = source.connect(move |sessions| {
            adapter.submit(sessions.clone());
        });

        let previous = self.source.lock().replace((source, id));
        if let Some((old_source, old_id)) = previous {
            old_source.disconnect(old_id);
        }
    }

    /// Drops the current data-source subscription, if any.
    pub fn detach_source(&self) {
        if let Some((source, id)) = self.source.lock().take() {
            source.disconnect(id);
        }
    }

    /// How many grid units the row at `position` spans.
    ///
    /// The layout host's span lookup delegates here.
    pub fn span_at(&self, position: usize) -> u32 {
        self.adapter.span_at(position)
    }
}

impl Drop for SleepTrackerController {
    fn drop(&mut self) {
        self.detach_source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowKind, SleepQuality, GRID_COLUMNS};
    use chrono::{Duration, TimeZone, Utc};

    fn session(id: i64, score: u8) -> SleepSession {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 22, 0, 0).unwrap();
        SleepSession::new(
            id,
            SleepQuality::Rated(score),
            start,
            start + Duration::hours(8),
        )
    }

    #[test]
    fn test_source_emissions_flow_into_the_adapter() {
        let controller = SleepTrackerController::new();
        let source: Arc<SessionSource> = Arc::new(Signal::new());
        controller.attach_source(source.clone());

        source.emit(Some(vec![session(1, 3), session(2, 4)]));
        assert_eq!(controller.adapter().count(), 3);

        source.emit(None);
        assert_eq!(controller.adapter().count(), 1);
    }

    #[test]
    fn test_detach_stops_forwarding() {
        let controller = SleepTrackerController::new();
        let source: Arc<SessionSource> = Arc::new(Signal::new());
        controller.attach_source(source.clone());

        source.emit(Some(vec![session(1, 3)]));
        controller.detach_source();
        source.emit(Some(vec![session(1, 3), session(2, 4)]));

        assert_eq!(controller.adapter().count(), 2);
        assert_eq!(source.connection_count(), 0);
    }

    #[test]
    fn test_reattach_replaces_the_subscription() {
        let controller = SleepTrackerController::new();
        let first: Arc<SessionSource> = Arc::new(Signal::new());
        let second: Arc<SessionSource> = Arc::new(Signal::new());

        controller.attach_source(first.clone());
        controller.attach_source(second.clone());
        assert_eq!(first.connection_count(), 0);
        assert_eq!(second.connection_count(), 1);
    }

    #[test]
    fn test_tap_surfaces_as_navigation_request() {
        let controller = SleepTrackerController::new();
        let source: Arc<SessionSource> = Arc::new(Signal::new());
        controller.attach_source(source.clone());
        source.emit(Some(vec![session(42, 3)]));

        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = requests.clone();
        controller
            .navigate_to_detail
            .connect(move |&id| sink.lock().push(id));

        let adapter = controller.adapter();
        let mut holder = adapter.create_holder(RowKind::Session.tag());
        adapter.bind(holder.as_mut(), 1);
        holder
            .as_any()
            .downcast_ref::<crate::row::SessionHolder>()
            .unwrap()
            .tap();

        assert_eq!(*requests.lock(), vec![42]);
    }

    #[test]
    fn test_span_lookup_delegates_to_the_adapter() {
        let controller = SleepTrackerController::new();
        let source: Arc<SessionSource> = Arc::new(Signal::new());
        controller.attach_source(source.clone());
        source.emit(Some(vec![session(1, 3)]));

        assert_eq!(controller.span_at(0), GRID_COLUMNS);
        assert_eq!(controller.span_at(1), 1);
    }

    #[test]
    fn test_drop_disconnects_from_the_source() {
        let source: Arc<SessionSource> = Arc::new(Signal::new());
        {
            let controller = SleepTrackerController::new();
            controller.attach_source(source.clone());
            assert_eq!(source.connection_count(), 1);
        }
        assert_eq!(source.connection_count(), 0);
    }
}
