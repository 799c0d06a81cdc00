//! Lesson entity and its per-field helpers.

mod color;
mod id;
mod time;

pub use color::SubjectColor;
pub use id::{IdAllocator, FIRST_LESSON_ID};
pub use time::{format_countdown, parse_clock, remaining};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub type LessonId = u32;

/// The content-bearing fields of a lesson, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFields {
    pub title: String,
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub teacher: String,
}

impl LessonFields {
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            room: String::new(),
            teacher: String::new(),
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }
}

/// One lesson occurrence, either in the weekly template or in a date override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default, alias = "isCompleted")]
    pub completed: bool,
    #[serde(default)]
    pub homework: String,
    /// Template lesson this one was cloned from when its date was materialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<LessonId>,
}

impl Lesson {
    pub fn new(id: LessonId, fields: LessonFields) -> Self {
        Self {
            id,
            title: fields.title,
            start_time: fields.start_time,
            end_time: fields.end_time,
            room: fields.room,
            teacher: fields.teacher,
            completed: false,
            homework: String::new(),
            source_id: None,
        }
    }

    pub fn fields(&self) -> LessonFields {
        LessonFields {
            title: self.title.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            room: self.room.clone(),
            teacher: self.teacher.clone(),
        }
    }

    /// Replace the content fields, keeping id, completion and homework.
    pub fn apply(&mut self, fields: LessonFields) {
        self.title = fields.title;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.room = fields.room;
        self.teacher = fields.teacher;
    }

    /// Copy of this lesson for a newly materialized date, under a fresh id.
    pub fn clone_as(&self, id: LessonId) -> Self {
        Self {
            id,
            source_id: Some(self.id),
            ..self.clone()
        }
    }

    /// Equal in title, times, room and teacher.
    pub fn content_eq(&self, other: &Lesson) -> bool {
        self.title == other.title
            && self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.room == other.room
            && self.teacher == other.teacher
    }

    pub fn color(&self) -> SubjectColor {
        SubjectColor::for_title(&self.title)
    }

    pub fn start(&self) -> NaiveTime {
        parse_clock(&self.start_time)
    }

    pub fn end(&self) -> NaiveTime {
        parse_clock(&self.end_time)
    }

    /// Whether `time` falls in `[start, end)`. Empty or inverted intervals never match.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let (start, end) = (self.start(), self.end());
        start <= time && time < end
    }

    pub fn has_homework(&self) -> bool {
        !self.homework.trim().is_empty()
    }

    /// "Title (room)", or just the title when no room is set.
    pub fn label(&self) -> String {
        if self.room.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.room)
        }
    }
}

/// Stable sort by parsed start time; malformed times sort as 00:00.
pub fn sort_by_start(lessons: &mut [Lesson]) {
    lessons.sort_by_key(Lesson::start);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math() -> Lesson {
        Lesson::new(
            1,
            LessonFields::new("Math", "08:30", "09:15")
                .with_room("101")
                .with_teacher("Ivanova"),
        )
    }

    #[test]
    fn content_equality_ignores_occurrence_state() {
        let a = math();
        let mut b = a.clone_as(7);
        b.completed = true;
        b.homework = "p. 42".into();
        assert!(a.content_eq(&b));
        assert_ne!(a, b);

        b.room = "102".into();
        assert!(!a.content_eq(&b));
    }

    #[test]
    fn clone_as_remembers_source() {
        let copy = math().clone_as(300);
        assert_eq!(copy.id, 300);
        assert_eq!(copy.source_id, Some(1));
    }

    #[test]
    fn apply_preserves_occurrence_state() {
        let mut lesson = math();
        lesson.completed = true;
        lesson.homework = "ex. 5".into();
        lesson.apply(LessonFields::new("Physics", "10:00", "10:45"));
        assert_eq!(lesson.title, "Physics");
        assert_eq!(lesson.id, 1);
        assert!(lesson.completed);
        assert_eq!(lesson.homework, "ex. 5");
        assert_eq!(lesson.color().hex(), "#64B5F6");
    }

    #[test]
    fn contains_is_half_open() {
        let lesson = math();
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(lesson.contains(at(8, 30)));
        assert!(lesson.contains(at(9, 14)));
        assert!(!lesson.contains(at(9, 15)));
        assert!(!lesson.contains(at(8, 29)));
    }

    #[test]
    fn inverted_interval_never_contains() {
        let lesson = Lesson::new(2, LessonFields::new("Odd", "10:00", "09:00"));
        assert!(!lesson.contains(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert!(!lesson.contains(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
    }

    #[test]
    fn sorts_malformed_first() {
        let mut lessons = vec![
            math(),
            Lesson::new(2, LessonFields::new("Broken", "soon", "later")),
            Lesson::new(3, LessonFields::new("Early", "07:45", "08:25")),
        ];
        sort_by_start(&mut lessons);
        let ids: Vec<_> = lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn label_skips_empty_room() {
        assert_eq!(math().label(), "Math (101)");
        let lesson = Lesson::new(5, LessonFields::new("Art", "12:00", "12:45"));
        assert_eq!(lesson.label(), "Art");
    }

    #[test]
    fn deserializes_legacy_completion_flag() {
        let json = r#"{"id":5,"title":"Bio","startTime":"10:00","endTime":"10:45",
            "room":"","teacher":"","isCompleted":true,"homework":"","subjectColor":4286627016}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert!(lesson.completed);
        assert_eq!(lesson.source_id, None);
    }
}
