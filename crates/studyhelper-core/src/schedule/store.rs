//! In-memory schedule store.
//!
//! Owns both schedule layers and both holiday sets, plus the id allocator.
//! Mutations are total: a missing lesson or a template-only scope is a
//! no-op reported through the boolean return value, never an error.
//!
//! ## Materialization
//!
//! The first date-specific mutation of a date copies the template list for
//! its weekday into a new override with fresh ids (copy-on-write). Each copy
//! keeps the template id as `source_id`, so a caller holding an id read
//! from the unmaterialized view still addresses exactly one lesson.

use chrono::NaiveDate;
use tracing::debug;

use super::{DayOfWeek, DaySelector, ScheduleData};
use crate::lesson::{IdAllocator, Lesson, LessonFields, LessonId};

#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    data: ScheduleData,
    ids: IdAllocator,
}

impl ScheduleStore {
    pub fn new(ids: IdAllocator) -> Self {
        Self::from_data(ScheduleData::default(), ids)
    }

    /// Wrap existing data. The allocator is advanced past every stored id.
    pub fn from_data(data: ScheduleData, mut ids: IdAllocator) -> Self {
        if let Some(max) = data.max_lesson_id() {
            ids.observe(max);
        }
        Self { data, ids }
    }

    pub fn data(&self) -> &ScheduleData {
        &self.data
    }

    /// Clone of the full state, for persistence and export.
    pub fn snapshot(&self) -> ScheduleData {
        self.data.clone()
    }

    /// Replace the full state (import). Ids in `data` are kept as-is.
    pub fn replace(&mut self, data: ScheduleData) {
        if let Some(max) = data.max_lesson_id() {
            self.ids.observe(max);
        }
        self.data = data;
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    // ── Lesson commands ──────────────────────────────────────────────

    /// Add a lesson and clear the scope's holiday flag. Returns the new id.
    pub fn add_lesson(&mut self, scope: DaySelector, fields: LessonFields) -> LessonId {
        match scope {
            DaySelector::Weekday(day) => {
                let id = self.ids.next_id();
                self.data
                    .template
                    .entry(day)
                    .or_default()
                    .push(Lesson::new(id, fields));
                self.data.master_holidays.remove(&day);
                id
            }
            DaySelector::Date(date) => {
                self.materialize(date);
                let id = self.ids.next_id();
                self.data
                    .overrides
                    .entry(date)
                    .or_default()
                    .push(Lesson::new(id, fields));
                self.data.specific_holidays.remove(&date);
                id
            }
        }
    }

    /// Replace a lesson's content fields. Returns false if no lesson matched.
    pub fn edit_lesson(&mut self, scope: DaySelector, id: LessonId, fields: LessonFields) -> bool {
        self.update(scope, id, |lesson| lesson.apply(fields))
    }

    pub fn delete_lesson(&mut self, scope: DaySelector, id: LessonId) -> bool {
        let Some(list) = self.list_mut(scope) else {
            return false;
        };
        match locate(list, id, scope.is_template()) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip completion of one occurrence. Template days have no occurrences.
    pub fn toggle_completion(&mut self, scope: DaySelector, id: LessonId) -> bool {
        if scope.is_template() {
            return false;
        }
        self.update(scope, id, |lesson| lesson.completed = !lesson.completed)
    }

    pub fn set_homework(&mut self, scope: DaySelector, id: LessonId, text: &str) -> bool {
        if scope.is_template() {
            return false;
        }
        let text = text.to_string();
        self.update(scope, id, move |lesson| lesson.homework = text)
    }

    // ── Day commands ─────────────────────────────────────────────────

    /// Flip the scope's effective holiday status. Returns the new status.
    ///
    /// Marking a template day clears its lessons for good. Un-marking a date
    /// whose holiday comes from the template materializes an empty override.
    pub fn toggle_holiday(&mut self, scope: DaySelector) -> bool {
        match scope {
            DaySelector::Weekday(day) => {
                if self.data.master_holidays.remove(&day) {
                    false
                } else {
                    self.data.master_holidays.insert(day);
                    self.data.template.remove(&day);
                    true
                }
            }
            DaySelector::Date(date) => {
                if self.data.is_date_holiday(date) {
                    self.data.specific_holidays.remove(&date);
                    if self.data.master_holidays.contains(&DayOfWeek::of(date)) {
                        self.data.overrides.entry(date).or_default();
                    }
                    false
                } else {
                    self.data.specific_holidays.insert(date);
                    self.data.overrides.remove(&date);
                    true
                }
            }
        }
    }

    /// Drop a date's override and specific holiday. No-op for template days.
    pub fn reset_to_template(&mut self, scope: DaySelector) -> bool {
        let DaySelector::Date(date) = scope else {
            return false;
        };
        let had_override = self.data.overrides.remove(&date).is_some();
        let had_holiday = self.data.specific_holidays.remove(&date);
        had_override || had_holiday
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Create the override for `date` from the template if it does not exist.
    fn materialize(&mut self, date: NaiveDate) -> &mut Vec<Lesson> {
        let ScheduleData {
            template,
            overrides,
            ..
        } = &mut self.data;
        let ids = &mut self.ids;
        overrides.entry(date).or_insert_with(|| {
            let source = template
                .get(&DayOfWeek::of(date))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            debug!(%date, lessons = source.len(), "materializing date override");
            source.iter().map(|l| l.clone_as(ids.next_id())).collect()
        })
    }

    /// The list a mutation of `scope` writes to, materializing dates.
    fn list_mut(&mut self, scope: DaySelector) -> Option<&mut Vec<Lesson>> {
        match scope {
            DaySelector::Weekday(day) => self.data.template.get_mut(&day),
            DaySelector::Date(date) => Some(self.materialize(date)),
        }
    }

    fn update(&mut self, scope: DaySelector, id: LessonId, f: impl FnOnce(&mut Lesson)) -> bool {
        let Some(list) = self.list_mut(scope) else {
            return false;
        };
        match locate(list, id, scope.is_template()) {
            Some(index) => {
                f(&mut list[index]);
                true
            }
            None => {
                debug!(%scope, id, "lesson not found, mutation skipped");
                false
            }
        }
    }
}

/// Find a lesson by id; in an override, fall back to the template id it was cloned from.
fn locate(list: &[Lesson], id: LessonId, template: bool) -> Option<usize> {
    list.iter().position(|l| l.id == id).or_else(|| {
        if template {
            None
        } else {
            list.iter().position(|l| l.source_id == Some(id))
        }
    })
}
