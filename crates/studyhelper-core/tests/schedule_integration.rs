//! Integration tests for the schedule store, resolution and persistence.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use studyhelper_core::schedule::{export_json, import_json};
use studyhelper_core::{
    Database, DayOfWeek, DaySelector, LessonFields, LessonPhase, ReloadSignal, ScheduleSession,
    ScheduleStore,
};

// 2026-10-19 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn lesson_fields() -> impl Strategy<Value = LessonFields> {
    (
        prop::sample::select(vec!["Math", "Physics", "Biology", "History", "Music"]),
        0u32..23,
        0u32..60,
        1u32..90,
        prop::sample::select(vec!["", "101", "204"]),
    )
        .prop_map(|(title, h, m, len, room)| {
            let start = clock(h, m);
            let end = start + Duration::minutes(i64::from(len));
            LessonFields::new(
                title,
                start.format("%H:%M").to_string(),
                end.format("%H:%M").to_string(),
            )
            .with_room(room)
        })
}

fn template_store(lessons: &[LessonFields]) -> ScheduleStore {
    let mut store = ScheduleStore::default();
    for fields in lessons {
        store.add_lesson(DaySelector::Weekday(DayOfWeek::Monday), fields.clone());
    }
    store
}

proptest! {
    #[test]
    fn untouched_date_shows_sorted_template(lessons in prop::collection::vec(lesson_fields(), 0..8)) {
        let store = template_store(&lessons);
        let data = store.data();
        prop_assert_eq!(
            data.effective_lessons(DaySelector::Date(monday())),
            data.effective_lessons(DaySelector::Weekday(DayOfWeek::Monday))
        );
        prop_assert!(!data.is_modified(DaySelector::Date(monday())));
    }

    #[test]
    fn materialize_then_reset_restores_template(
        lessons in prop::collection::vec(lesson_fields(), 1..8),
        extra in lesson_fields(),
    ) {
        let mut store = template_store(&lessons);
        let date = DaySelector::Date(monday());
        store.add_lesson(date, extra);
        prop_assert!(store.data().is_modified(date));

        store.reset_to_template(date);
        let template = store.data().effective_lessons(DaySelector::Weekday(DayOfWeek::Monday));
        let effective = store.data().effective_lessons(date);
        prop_assert_eq!(effective.len(), template.len());
        for (a, b) in effective.iter().zip(&template) {
            prop_assert!(a.content_eq(b));
        }
        prop_assert!(!store.data().is_modified(date));
    }

    #[test]
    fn export_import_is_observably_identical(lessons in prop::collection::vec(lesson_fields(), 0..8)) {
        let mut store = template_store(&lessons);
        let date = DaySelector::Date(monday());
        if let Some(first) = store.data().effective_lessons(date).first().cloned() {
            store.set_homework(date, first.id, "read chapter 3");
        }
        store.toggle_holiday(DaySelector::Weekday(DayOfWeek::Sunday));

        let json = export_json(store.data()).unwrap();
        let restored = import_json(&json).unwrap();
        for offset in 0..7 {
            let probe = DaySelector::Date(monday() + Duration::days(offset));
            prop_assert_eq!(restored.effective_lessons(probe), store.data().effective_lessons(probe));
            prop_assert_eq!(restored.is_holiday(probe), store.data().is_holiday(probe));
        }
        for day in DayOfWeek::ALL {
            let probe = DaySelector::Weekday(day);
            prop_assert_eq!(restored.effective_lessons(probe), store.data().effective_lessons(probe));
        }
    }
}

#[test]
fn test_current_or_next_through_the_day() {
    let mut store = ScheduleStore::default();
    let mon = DaySelector::Weekday(DayOfWeek::Monday);
    store.add_lesson(mon, LessonFields::new("Physics", "09:25", "10:10"));
    store.add_lesson(mon, LessonFields::new("Math", "08:30", "09:15"));
    let data = store.data();

    let probe = |h, m| {
        let now = clock(h, m);
        let r = data.current_or_next(monday(), now);
        (r.phase, r.lesson.as_ref().map(|l| l.title.clone()), r.countdown(now))
    };

    assert_eq!(
        probe(8, 0),
        (LessonPhase::StartsIn, Some("Math".to_string()), Some("30:00".to_string()))
    );
    assert_eq!(
        probe(8, 45),
        (LessonPhase::EndsIn, Some("Math".to_string()), Some("30:00".to_string()))
    );
    assert_eq!(
        probe(9, 20),
        (LessonPhase::StartsIn, Some("Physics".to_string()), Some("05:00".to_string()))
    );
    assert_eq!(probe(10, 15), (LessonPhase::Finished, None, None));
}

#[test]
fn test_template_holiday_is_destructive() {
    let mut store = ScheduleStore::default();
    let wed = DaySelector::Weekday(DayOfWeek::Wednesday);
    store.add_lesson(wed, LessonFields::new("History", "10:00", "10:45"));

    assert!(store.toggle_holiday(wed));
    assert!(store.data().effective_lessons(wed).is_empty());
    assert!(!store.toggle_holiday(wed));
    assert!(store.data().effective_lessons(wed).is_empty());
}

#[test]
fn test_materialized_copy_is_detached_from_template() {
    let mut store = ScheduleStore::default();
    let mon = DaySelector::Weekday(DayOfWeek::Monday);
    let math = store.add_lesson(mon, LessonFields::new("Math", "08:30", "09:15"));

    let date = DaySelector::Date(monday());
    store.add_lesson(date, LessonFields::new("Biology", "11:00", "11:45"));
    let copies = store.data().effective_lessons(date);
    assert_eq!(copies.len(), 2);
    assert!(copies.iter().all(|l| l.id != math));

    store.edit_lesson(mon, math, LessonFields::new("Algebra", "08:30", "09:15"));
    let copies = store.data().effective_lessons(date);
    assert!(copies.iter().any(|l| l.title == "Math"));
    assert!(copies.iter().all(|l| l.title != "Algebra"));
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studyhelper.db");
    let date = DaySelector::Date(monday());

    let (math, before) = {
        let mut session =
            ScheduleSession::open(Database::open_at(&path).unwrap(), ReloadSignal::new()).unwrap();
        let math = session
            .add_lesson(
                DaySelector::Weekday(DayOfWeek::Monday),
                LessonFields::new("Math", "08:30", "09:15").with_teacher("Ivanova"),
            )
            .unwrap();
        session.toggle_completion(date, math).unwrap();
        session
            .toggle_holiday(DaySelector::Date(monday() + Duration::days(1)))
            .unwrap();
        (math, session.data().clone())
    };

    let session =
        ScheduleSession::open(Database::open_at(&path).unwrap(), ReloadSignal::new()).unwrap();
    assert_eq!(session.data(), &before);
    let lessons = session.effective_lessons(date);
    assert!(lessons[0].completed);
    assert_eq!(lessons[0].source_id, Some(math));
    assert!(session.is_holiday(DaySelector::Date(monday() + Duration::days(1))));
}
