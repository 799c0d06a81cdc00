//! Resolution of the effective schedule.
//!
//! Override-over-template precedence, effective holiday status, the
//! "modified from template" diff and the current-or-next lesson lookup.
//! Everything here is read-only over [`ScheduleData`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{DayOfWeek, DaySelector, ScheduleData};
use crate::lesson::{remaining, sort_by_start, Lesson};

/// Where "now" sits relative to the day's lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonPhase {
    /// A lesson is running; the countdown is to its end.
    EndsIn,
    /// Nothing is running; the countdown is to the next lesson's start.
    StartsIn,
    /// No more lessons today.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentOrNext {
    pub phase: LessonPhase,
    pub lesson: Option<Lesson>,
}

impl CurrentOrNext {
    fn finished() -> Self {
        Self {
            phase: LessonPhase::Finished,
            lesson: None,
        }
    }

    /// `MM:SS` until the lesson ends (running) or starts (upcoming).
    pub fn countdown(&self, now: NaiveTime) -> Option<String> {
        let lesson = self.lesson.as_ref()?;
        match self.phase {
            LessonPhase::EndsIn => Some(remaining(&lesson.end_time, now)),
            LessonPhase::StartsIn => Some(remaining(&lesson.start_time, now)),
            LessonPhase::Finished => None,
        }
    }
}

impl ScheduleData {
    /// The lessons shown for a day, sorted by start time.
    ///
    /// Dates resolve holiday first, then override, then template. Returned
    /// lessons are copies; the stored lists are never handed out mutably.
    pub fn effective_lessons(&self, selector: DaySelector) -> Vec<Lesson> {
        let mut lessons = match selector {
            DaySelector::Weekday(day) => self.template_for(day).to_vec(),
            DaySelector::Date(date) => {
                if self.is_date_holiday(date) {
                    return Vec::new();
                }
                match self.override_for(date) {
                    Some(list) => list.to_vec(),
                    None => self.template_for(DayOfWeek::of(date)).to_vec(),
                }
            }
        };
        sort_by_start(&mut lessons);
        lessons
    }

    pub fn is_holiday(&self, selector: DaySelector) -> bool {
        match selector {
            DaySelector::Weekday(day) => self.master_holidays.contains(&day),
            DaySelector::Date(date) => self.is_date_holiday(date),
        }
    }

    /// Specific holiday, or a template holiday the date has not overridden.
    pub fn is_date_holiday(&self, date: NaiveDate) -> bool {
        self.specific_holidays.contains(&date)
            || (self.master_holidays.contains(&DayOfWeek::of(date)) && !self.has_override(date))
    }

    /// Whether a date's effective content differs from its weekday template.
    ///
    /// Always false for template days.
    pub fn is_modified(&self, selector: DaySelector) -> bool {
        let DaySelector::Date(date) = selector else {
            return false;
        };
        let day = DayOfWeek::of(date);
        if self.master_holidays.contains(&day) != self.is_date_holiday(date) {
            return true;
        }
        let Some(specific) = self.override_for(date) else {
            return false;
        };
        let template = self.template_for(day);
        if specific.len() != template.len() {
            return true;
        }

        let mut specific: Vec<&Lesson> = specific.iter().collect();
        let mut template: Vec<&Lesson> = template.iter().collect();
        specific.sort_by(|a, b| content_key(a).cmp(&content_key(b)));
        template.sort_by(|a, b| content_key(a).cmp(&content_key(b)));
        specific
            .iter()
            .zip(&template)
            .any(|(a, b)| !a.content_eq(b))
    }

    /// The running lesson at `time`, else the next one, else finished.
    pub fn current_or_next(&self, date: NaiveDate, time: NaiveTime) -> CurrentOrNext {
        let lessons = self.effective_lessons(DaySelector::Date(date));

        if let Some(active) = lessons.iter().find(|l| l.contains(time)) {
            return CurrentOrNext {
                phase: LessonPhase::EndsIn,
                lesson: Some(active.clone()),
            };
        }
        match lessons.into_iter().find(|l| l.start() > time) {
            Some(next) => CurrentOrNext {
                phase: LessonPhase::StartsIn,
                lesson: Some(next),
            },
            None => CurrentOrNext::finished(),
        }
    }

    /// [`current_or_next`](Self::current_or_next) for a view: only a date
    /// equal to `today` has a current lesson.
    pub fn current_or_next_for(
        &self,
        selector: DaySelector,
        today: NaiveDate,
        time: NaiveTime,
    ) -> Option<CurrentOrNext> {
        match selector {
            DaySelector::Date(date) if date == today => Some(self.current_or_next(date, time)),
            _ => None,
        }
    }
}

/// Total order over the fields [`Lesson::content_eq`] compares, so equal
/// multisets line up position by position even when start times repeat.
fn content_key(lesson: &Lesson) -> (NaiveTime, NaiveTime, &str, &str, &str, &str, &str) {
    (
        lesson.start(),
        lesson.end(),
        lesson.start_time.as_str(),
        lesson.end_time.as_str(),
        lesson.title.as_str(),
        lesson.room.as_str(),
        lesson.teacher.as_str(),
    )
}
