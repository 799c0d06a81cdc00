//! Persistence of the schedule snapshot.
//!
//! The snapshot is stored as one JSON value per key:
//!
//! | key                 | value                                  |
//! |---------------------|----------------------------------------|
//! | `master_schedule`   | weekday name → lesson list             |
//! | `specific_schedule` | ISO date → lesson list                 |
//! | `specific_holidays` | list of ISO dates                      |
//! | `master_holidays`   | list of weekday names                  |
//! | `next_lesson_id`    | id allocator high-water mark           |
//! | `revision`          | write counter, bumped on every save    |
//!
//! Loading is per key and soft: a key that is missing or fails to parse is
//! reported as `None` so the caller keeps whatever it already had.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::Database;
use crate::error::Result;
use crate::lesson::{Lesson, LessonId};
use crate::schedule::{DayOfWeek, ScheduleData};

const KEY_MASTER_SCHEDULE: &str = "master_schedule";
const KEY_SPECIFIC_SCHEDULE: &str = "specific_schedule";
const KEY_SPECIFIC_HOLIDAYS: &str = "specific_holidays";
const KEY_MASTER_HOLIDAYS: &str = "master_holidays";
const KEY_NEXT_LESSON_ID: &str = "next_lesson_id";
const KEY_REVISION: &str = "revision";

/// Result of reading the persisted snapshot. `None` fields were missing or malformed.
#[derive(Debug, Clone, Default)]
pub struct LoadedSchedule {
    pub template: Option<BTreeMap<DayOfWeek, Vec<Lesson>>>,
    pub overrides: Option<BTreeMap<NaiveDate, Vec<Lesson>>>,
    pub specific_holidays: Option<BTreeSet<NaiveDate>>,
    pub master_holidays: Option<BTreeSet<DayOfWeek>>,
    pub next_lesson_id: Option<LessonId>,
    pub revision: u64,
}

impl LoadedSchedule {
    /// Overwrite the parts of `data` that were loaded; leave the rest untouched.
    pub fn merge_into(self, data: &mut ScheduleData) {
        if let Some(template) = self.template {
            data.template = template;
        }
        if let Some(overrides) = self.overrides {
            data.overrides = overrides;
        }
        if let Some(holidays) = self.specific_holidays {
            data.specific_holidays = holidays;
        }
        if let Some(holidays) = self.master_holidays {
            data.master_holidays = holidays;
        }
    }
}

/// Where the editing session and the monitor read and write the snapshot.
pub trait ScheduleRepository {
    fn load(&self) -> Result<LoadedSchedule>;

    /// Write the full snapshot and bump the revision. Returns the new revision.
    fn save(&self, data: &ScheduleData, next_lesson_id: LessonId) -> Result<u64>;

    /// Current revision, cheap enough to poll every tick.
    fn revision(&self) -> Result<u64>;
}

impl Database {
    fn kv_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.kv_get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed stored value");
                Ok(None)
            }
        }
    }
}

impl ScheduleRepository for Database {
    fn load(&self) -> Result<LoadedSchedule> {
        Ok(LoadedSchedule {
            template: self.kv_json(KEY_MASTER_SCHEDULE)?,
            overrides: self.kv_json(KEY_SPECIFIC_SCHEDULE)?,
            specific_holidays: self.kv_json(KEY_SPECIFIC_HOLIDAYS)?,
            master_holidays: self.kv_json(KEY_MASTER_HOLIDAYS)?,
            next_lesson_id: self.kv_json(KEY_NEXT_LESSON_ID)?,
            revision: self.revision()?,
        })
    }

    fn save(&self, data: &ScheduleData, next_lesson_id: LessonId) -> Result<u64> {
        let revision = self.revision()?.wrapping_add(1);
        self.kv_set_many(&[
            (KEY_MASTER_SCHEDULE, serde_json::to_string(&data.template)?),
            (KEY_SPECIFIC_SCHEDULE, serde_json::to_string(&data.overrides)?),
            (KEY_SPECIFIC_HOLIDAYS, serde_json::to_string(&data.specific_holidays)?),
            (KEY_MASTER_HOLIDAYS, serde_json::to_string(&data.master_holidays)?),
            (KEY_NEXT_LESSON_ID, next_lesson_id.to_string()),
            (KEY_REVISION, revision.to_string()),
        ])?;
        Ok(revision)
    }

    fn revision(&self) -> Result<u64> {
        Ok(self
            .kv_get(KEY_REVISION)?
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0))
    }
}
