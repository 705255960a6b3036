//! Presentation formatting for session rows.
//!
//! Maps a session's quality rating to its label, status color policy, and
//! icon, and renders the elapsed sleep time as text. Pure functions; the
//! holders call these on every bind.

use chrono::{DateTime, Utc};

use crate::model::SleepQuality;

/// Label shown when a session is unrated or its score is out of range.
pub const QUALITY_PLACEHOLDER: &str = "--";

/// The textual label for a quality rating.
///
/// Out-of-range scores fall back to the placeholder rather than failing;
/// rendering must always produce something displayable.
pub fn quality_label(quality: SleepQuality) -> &'static str {
    match quality {
        SleepQuality::Rated(0) => "Very bad",
        SleepQuality::Rated(1) => "Poor",
        SleepQuality::Rated(2) => "So-so",
        SleepQuality::Rated(3) => "OK",
        SleepQuality::Rated(4) => "Pretty good",
        SleepQuality::Rated(5) => "Excellent",
        SleepQuality::Rated(_) | SleepQuality::Active => QUALITY_PLACEHOLDER,
    }
}

/// The icon asset displayed for a quality rating.
///
/// One icon per score in `0..=5`; everything else, including a session still
/// being recorded, shows the active icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityIcon {
    Quality0,
    Quality1,
    Quality2,
    Quality3,
    Quality4,
    Quality5,
    /// Fallback for active sessions and out-of-range scores.
    Active,
}

impl QualityIcon {
    /// Resolves the icon for a rating.
    pub fn for_quality(quality: SleepQuality) -> Self {
        match quality {
            SleepQuality::Rated(0) => Self::Quality0,
            SleepQuality::Rated(1) => Self::Quality1,
            SleepQuality::Rated(2) => Self::Quality2,
            SleepQuality::Rated(3) => Self::Quality3,
            SleepQuality::Rated(4) => Self::Quality4,
            SleepQuality::Rated(5) => Self::Quality5,
            SleepQuality::Rated(_) | SleepQuality::Active => Self::Active,
        }
    }

    /// The asset name the resource layer resolves to an image.
    pub fn asset_name(self) -> &'static str {
        match self {
            Self::Quality0 => "ic_sleep_0",
            Self::Quality1 => "ic_sleep_1",
            Self::Quality2 => "ic_sleep_2",
            Self::Quality3 => "ic_sleep_3",
            Self::Quality4 => "ic_sleep_4",
            Self::Quality5 => "ic_sleep_5",
            Self::Active => "ic_sleep_active",
        }
    }
}

/// Renders the elapsed time between `started_at` and `ended_at`, stamped
/// with the weekday the session started on.
///
/// Sub-minute spans render in seconds, sub-hour spans in whole minutes,
/// anything longer in fractional hours. A span that runs backwards clamps to
/// zero.
pub fn format_sleep_length(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> String {
    let elapsed = ended_at.signed_duration_since(started_at);
    let seconds = elapsed.num_seconds().max(0);
    let weekday = started_at.format("%A");

    if seconds < 60 {
        format!("{} seconds on {}", seconds, weekday)
    } else if seconds < 3600 {
        format!("{} minutes on {}", seconds / 60, weekday)
    } else {
        format!("{:.1} hours on {}", seconds as f64 / 3600.0, weekday)
    }
}
