//! Lesson monitor state machine.
//!
//! Pure and clock-free: the caller passes the snapshot and the local time
//! on every `tick()`. The runner in [`super::runner`] drives it once per
//! second.
//!
//! ## State Transitions
//!
//! ```text
//! NoActiveLesson -> Active(a)             "lesson started" (fresh starts only near the start time)
//! Active(a)      -> Active(b)             "lesson started" (back-to-back, always)
//! Active(a)      -> NoActiveLesson        "lesson ended"
//! ```

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::events::Event;
use crate::lesson::{Lesson, LessonId};
use crate::schedule::{DaySelector, LessonPhase, ScheduleData};

/// `Active` holds the lesson's identity: the template id it was cloned
/// from, or its own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorState {
    NoActiveLesson,
    Active(LessonId),
}

/// The persistent one-line summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Active { label: String, countdown: String },
    Upcoming { label: String, countdown: String },
    Finished,
}

impl StatusLine {
    /// Status for `now` from the effective lessons of its date.
    pub fn compute(data: &ScheduleData, now: NaiveDateTime) -> Self {
        let time = now.time();
        let result = data.current_or_next(now.date(), time);
        let countdown = result.countdown(time).unwrap_or_default();
        match (result.phase, result.lesson) {
            (LessonPhase::EndsIn, Some(lesson)) => StatusLine::Active {
                label: lesson.label(),
                countdown,
            },
            (LessonPhase::StartsIn, Some(lesson)) => StatusLine::Upcoming {
                label: lesson.label(),
                countdown,
            },
            _ => StatusLine::Finished,
        }
    }

    /// Notification title.
    pub fn title(&self) -> String {
        match self {
            StatusLine::Active { label, .. } => label.clone(),
            StatusLine::Upcoming { label, .. } => format!("next: {label}"),
            StatusLine::Finished => "lessons finished for today".to_string(),
        }
    }

    /// Notification body.
    pub fn body(&self) -> String {
        match self {
            StatusLine::Active { countdown, .. } => format!("ends in {countdown}"),
            StatusLine::Upcoming { countdown, .. } => format!("starts in {countdown}"),
            StatusLine::Finished => String::new(),
        }
    }

    pub fn to_event(&self, at: NaiveDateTime) -> Event {
        Event::StatusUpdated {
            summary: self.to_string(),
            title: self.title(),
            body: self.body(),
            at,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Finished => f.write_str("lessons finished for today"),
            _ => write!(f, "{} — {}", self.title(), self.body()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Started,
    Ended,
}

/// A high-priority, one-shot notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub lesson_id: LessonId,
    pub title: String,
    pub body: String,
}

impl Alert {
    fn new(kind: AlertKind, lesson: &Lesson) -> Self {
        let title = match kind {
            AlertKind::Started => "Lesson started",
            AlertKind::Ended => "Lesson ended",
        };
        Self {
            kind,
            lesson_id: lesson.id,
            title: title.to_string(),
            body: lesson.label(),
        }
    }

    pub fn into_event(self, at: NaiveDateTime) -> Event {
        match self.kind {
            AlertKind::Started => Event::LessonStarted {
                lesson_id: self.lesson_id,
                title: self.title,
                body: self.body,
                at,
            },
            AlertKind::Ended => Event::LessonEnded {
                lesson_id: self.lesson_id,
                title: self.title,
                body: self.body,
                at,
            },
        }
    }
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorTick {
    pub status: StatusLine,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone)]
pub struct LessonMonitor {
    state: MonitorState,
    fresh_start_window: TimeDelta,
}

impl LessonMonitor {
    pub fn new(fresh_start_window: Duration) -> Self {
        Self {
            state: MonitorState::NoActiveLesson,
            fresh_start_window: TimeDelta::from_std(fresh_start_window)
                .unwrap_or(TimeDelta::seconds(60)),
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Advance the state machine to `now` and return the status line plus
    /// any alerts for transitions since the previous tick.
    pub fn tick(&mut self, data: &ScheduleData, now: NaiveDateTime) -> MonitorTick {
        let status = StatusLine::compute(data, now);
        let today = data.effective_lessons(DaySelector::Date(now.date()));
        let active = today.iter().find(|l| l.contains(now.time()));

        let mut alerts = Vec::new();
        match (self.state, active) {
            (MonitorState::NoActiveLesson, Some(lesson)) => {
                if self.is_fresh_start(lesson.start(), now.time()) {
                    alerts.push(Alert::new(AlertKind::Started, lesson));
                }
                self.state = MonitorState::Active(identity(lesson));
            }
            (MonitorState::Active(prev), Some(lesson)) => {
                if !same_lesson(lesson, prev) {
                    alerts.push(Alert::new(AlertKind::Started, lesson));
                }
                self.state = MonitorState::Active(identity(lesson));
            }
            (MonitorState::Active(prev), None) => {
                // Deleted lessons end silently.
                if let Some(ended) = today.iter().find(|l| same_lesson(l, prev)) {
                    alerts.push(Alert::new(AlertKind::Ended, ended));
                }
                self.state = MonitorState::NoActiveLesson;
            }
            (MonitorState::NoActiveLesson, None) => {}
        }

        MonitorTick { status, alerts }
    }

    fn is_fresh_start(&self, start: NaiveTime, now: NaiveTime) -> bool {
        let since = now - start;
        since >= TimeDelta::zero() && since <= self.fresh_start_window
    }
}

impl Default for LessonMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

fn identity(lesson: &Lesson) -> LessonId {
    lesson.source_id.unwrap_or(lesson.id)
}

/// A materialized copy keeps the identity of the template lesson it came from.
fn same_lesson(lesson: &Lesson, id: LessonId) -> bool {
    lesson.id == id || lesson.source_id == Some(id)
}
