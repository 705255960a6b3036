//! The sleep-session record displayed by the list.
//!
//! `SleepSession` is the unit of data the tracker screen renders: one
//! recorded night with a unique id, a quality rating, and the start/end
//! instants of the sleep period. Sessions arrive from the persistence layer
//! as an ordered sequence; this module only defines their shape.

use chrono::{DateTime, Duration, Utc};

/// The quality rating attached to a sleep session.
///
/// A finished session carries a numeric score; a session that is still being
/// recorded carries the `Active` marker instead. Scores are nominally in
/// `0..=5`, but the type does not enforce the upper bound: rendering maps
/// out-of-range scores to the fallback label and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleepQuality {
    /// A finished session rated with a numeric score (nominally `0..=5`).
    Rated(u8),
    /// A session still in progress, not yet rated.
    Active,
}

impl SleepQuality {
    /// Scores at or below this threshold render in the alert color.
    pub const ALERT_THRESHOLD: u8 = 1;

    /// Returns the numeric score, or `None` for an active session.
    #[inline]
    pub fn score(self) -> Option<u8> {
        match self {
            Self::Rated(score) => Some(score),
            Self::Active => None,
        }
    }

    /// Returns `true` if the session is still being recorded.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if this rating should render in the alert color.
    ///
    /// Only finished sessions at or below [`ALERT_THRESHOLD`](Self::ALERT_THRESHOLD)
    /// alert; an active session is neutral.
    #[inline]
    pub fn is_alert(self) -> bool {
        matches!(self, Self::Rated(score) if score <= Self::ALERT_THRESHOLD)
    }
}

/// One recorded night of sleep.
///
/// The id is assigned by the persistence layer and is unique across all
/// sessions; the diff engine uses it as the identity key to recognize the
/// same logical session across two emissions. Content equality (`PartialEq`)
/// covers every field, so a re-rated session with an unchanged id is detected
/// as an update, not an insert/remove pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepSession {
    id: i64,
    quality: SleepQuality,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
}

impl SleepSession {
    /// Creates a session record.
    pub fn new(
        id: i64,
        quality: SleepQuality,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            quality,
            started_at,
            ended_at,
        }
    }

    /// The unique id assigned by the persistence layer.
    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The quality rating.
    #[inline]
    pub fn quality(&self) -> SleepQuality {
        self.quality
    }

    /// When the session started.
    #[inline]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the session ended.
    #[inline]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    /// Elapsed time between start and end.
    ///
    /// Clamped to zero if the end instant precedes the start instant.
    pub fn elapsed(&self) -> Duration {
        let elapsed = self.ended_at - self.started_at;
        if elapsed < Duration::zero() {
            Duration::zero()
        } else {
            elapsed
        }
    }
}
