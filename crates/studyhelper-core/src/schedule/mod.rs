//! Schedule layers: the weekly template and per-date overrides.
//!
//! [`ScheduleData`] is the complete persisted snapshot. The resolution
//! queries live in [`resolve`], mutations in [`store`], and the
//! export/import document in [`backup`].

pub mod backup;
pub mod resolve;
pub mod store;

pub use backup::{export_json, import_json};
pub use resolve::{CurrentOrNext, LessonPhase};
pub use store::ScheduleStore;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::lesson::{Lesson, LessonId};

/// Day of the week, persisted as `MONDAY`..`SUNDAY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts chrono's short and long English names in any case ("mon", "Monday", "MONDAY").
impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(Into::into)
            .map_err(|_| format!("unknown weekday: {s}"))
    }
}

/// Which day a view or an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DaySelector {
    /// A day of the weekly template.
    Weekday(DayOfWeek),
    /// One calendar date.
    Date(NaiveDate),
}

impl DaySelector {
    pub fn weekday(&self) -> DayOfWeek {
        match self {
            DaySelector::Weekday(day) => *day,
            DaySelector::Date(date) => DayOfWeek::of(*date),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DaySelector::Weekday(_) => None,
            DaySelector::Date(date) => Some(*date),
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, DaySelector::Weekday(_))
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::Weekday(day) => write!(f, "template {day}"),
            DaySelector::Date(date) => write!(f, "{date}"),
        }
    }
}

/// The complete schedule: both layers and both holiday sets.
///
/// This is the shape written to storage and to export files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    /// Weekly template.
    #[serde(rename = "masterSchedule", default)]
    pub template: BTreeMap<DayOfWeek, Vec<Lesson>>,
    /// Per-date replacements of the template. An empty list is a real override.
    #[serde(rename = "specificSchedule", default)]
    pub overrides: BTreeMap<NaiveDate, Vec<Lesson>>,
    #[serde(default)]
    pub specific_holidays: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub master_holidays: BTreeSet<DayOfWeek>,
}

impl ScheduleData {
    pub fn template_for(&self, day: DayOfWeek) -> &[Lesson] {
        self.template.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn override_for(&self, date: NaiveDate) -> Option<&[Lesson]> {
        self.overrides.get(&date).map(Vec::as_slice)
    }

    pub fn has_override(&self, date: NaiveDate) -> bool {
        self.overrides.contains_key(&date)
    }

    /// Every stored lesson, template first.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.template
            .values()
            .chain(self.overrides.values())
            .flatten()
    }

    pub fn max_lesson_id(&self) -> Option<LessonId> {
        self.lessons().map(|l| l.id).max()
    }
}

/// The Monday-first week containing `date`. `None` when that week runs off
/// either end of the supported calendar.
pub fn week_dates(date: NaiveDate) -> Option<[NaiveDate; 7]> {
    let monday =
        date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
    monday.checked_add_days(Days::new(6))?;
    Some(std::array::from_fn(|i| monday + Days::new(i as u64)))
}

/// Date an editor opens on: today, or tomorrow when today is Sunday.
pub fn initial_selected_date(today: NaiveDate) -> NaiveDate {
    if today.weekday() == Weekday::Sun {
        today.succ_opt().unwrap_or(today)
    } else {
        today
    }
}
