//! Export/import document.
//!
//! The document is the pretty-printed JSON form of [`ScheduleData`]:
//! `masterSchedule`, `specificSchedule`, `specificHolidays`,
//! `masterHolidays`. Ids are carried verbatim so an export followed by an
//! import reproduces the same state.

use std::collections::HashSet;

use super::ScheduleData;
use crate::error::ImportError;

pub fn export_json(data: &ScheduleData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Parse and validate a backup document.
pub fn import_json(json: &str) -> Result<ScheduleData, ImportError> {
    let data: ScheduleData = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for lesson in data.lessons() {
        if !seen.insert(lesson.id) {
            return Err(ImportError::DuplicateLessonId(lesson.id));
        }
    }
    Ok(data)
}
