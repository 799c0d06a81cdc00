use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::lesson::LessonId;

/// Everything the background monitor publishes.
/// The CLI prints them; a notification surface would render them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A lesson became the active one.
    LessonStarted {
        lesson_id: LessonId,
        title: String,
        body: String,
        at: NaiveDateTime,
    },
    /// The active lesson ended and nothing follows it immediately.
    LessonEnded {
        lesson_id: LessonId,
        title: String,
        body: String,
        at: NaiveDateTime,
    },
    /// The persistent status line, republished every tick.
    StatusUpdated {
        summary: String,
        title: String,
        body: String,
        at: NaiveDateTime,
    },
    /// The monitor re-read the persisted snapshot.
    DataReloaded {
        revision: u64,
        at: NaiveDateTime,
    },
}

impl Event {
    pub fn at(&self) -> NaiveDateTime {
        match self {
            Event::LessonStarted { at, .. }
            | Event::LessonEnded { at, .. }
            | Event::StatusUpdated { at, .. }
            | Event::DataReloaded { at, .. } => *at,
        }
    }

    /// True for the high-priority started/ended alerts.
    pub fn is_alert(&self) -> bool {
        matches!(self, Event::LessonStarted { .. } | Event::LessonEnded { .. })
    }
}
