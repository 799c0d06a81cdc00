pub mod backup;
pub mod config;
pub mod day;
pub mod holiday;
pub mod homework;
pub mod lesson;
pub mod monitor;
pub mod now;
pub mod week;

use chrono::{Local, NaiveDate};
use clap::Args;
use studyhelper_core::{
    Database, DayOfWeek, DaySelector, Lesson, LessonId, ReloadSignal, ScheduleSession,
};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// `--weekday` edits the weekly template, `--date` one calendar date.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    /// Template weekday (mon..sun)
    #[arg(long)]
    pub weekday: Option<DayOfWeek>,
    /// Calendar date (YYYY-MM-DD or "today")
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

impl ScopeArgs {
    pub fn selector(&self) -> DaySelector {
        match (self.weekday, self.date) {
            (Some(day), _) => DaySelector::Weekday(day),
            (None, Some(date)) => DaySelector::Date(date),
            (None, None) => DaySelector::Date(today()),
        }
    }
}

/// A date-only target for per-occurrence edits.
#[derive(Args, Debug, Clone)]
pub struct DateArgs {
    /// Calendar date (YYYY-MM-DD or "today")
    #[arg(long, value_parser = parse_date, default_value = "today")]
    pub date: NaiveDate,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    match value {
        "today" => Ok(today()),
        "tomorrow" => today()
            .succ_opt()
            .ok_or_else(|| "tomorrow is outside the calendar".to_string()),
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{value}': {e}")),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn open_session() -> Result<ScheduleSession<Database>, Box<dyn std::error::Error>> {
    Ok(ScheduleSession::open(Database::open()?, ReloadSignal::new())?)
}

/// One line per lesson, as printed by `day show` and friends.
pub fn format_lesson(lesson: &Lesson) -> String {
    let mut line = format!(
        "[{}] {}-{} {}",
        lesson.id,
        lesson.start_time,
        lesson.end_time,
        lesson.label()
    );
    if !lesson.teacher.is_empty() {
        line.push_str(&format!(", {}", lesson.teacher));
    }
    if lesson.completed {
        line.push_str(" [done]");
    }
    if lesson.has_homework() {
        line.push_str(&format!(" hw: {}", lesson.homework));
    }
    line.push_str(&format!(" {}", lesson.color()));
    line
}

/// Complain on stderr when an id matched nothing. Lookup misses are not errors.
pub fn report_miss(found: bool, scope: DaySelector, id: LessonId) {
    if !found {
        eprintln!("no lesson {id} on {scope}");
    }
}
