//! Week overview.

use chrono::NaiveDate;
use clap::Subcommand;
use studyhelper_core::schedule::{initial_selected_date, week_dates};
use studyhelper_core::DaySelector;

use super::{open_session, parse_date, today, CliResult};

#[derive(Subcommand)]
pub enum WeekAction {
    /// Show the Monday-first week containing a date
    Show {
        /// Any date of the week (YYYY-MM-DD or "today"); defaults to today,
        /// or next Monday on a Sunday
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: WeekAction) -> CliResult {
    let session = open_session()?;

    match action {
        WeekAction::Show { date } => {
            let selected = date.unwrap_or_else(|| initial_selected_date(today()));
            let week = week_dates(selected)
                .ok_or_else(|| format!("the week of {selected} is outside the calendar"))?;
            for day in week {
                let selector = DaySelector::Date(day);
                let mut line = format!("{day} {:<9}", selector.weekday().name());
                if session.is_holiday(selector) {
                    line.push_str(" holiday");
                } else {
                    let count = session.effective_lessons(selector).len();
                    line.push_str(&format!(" {count} lesson(s)"));
                }
                if session.is_modified(selector) {
                    line.push_str(" [modified]");
                }
                if day == selected {
                    line.push_str(" *");
                }
                println!("{line}");
            }
        }
    }
    Ok(())
}
