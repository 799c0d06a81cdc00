//! Per-occurrence lesson commands: homework text and completion.

use clap::Subcommand;
use studyhelper_core::{DaySelector, LessonId};

use super::{open_session, report_miss, CliResult, DateArgs};

#[derive(Subcommand)]
pub enum HomeworkAction {
    /// Set the homework text of a lesson on a date (empty clears it)
    Set {
        #[command(flatten)]
        date: DateArgs,
        /// Lesson ID
        id: LessonId,
        text: String,
    },
    /// Flip the completed flag of a lesson on a date
    Toggle {
        #[command(flatten)]
        date: DateArgs,
        /// Lesson ID
        id: LessonId,
    },
}

pub fn run(action: HomeworkAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        HomeworkAction::Set { date, id, text } => {
            let selector = DaySelector::Date(date.date);
            let found = session.set_homework(selector, id, &text)?;
            report_miss(found, selector, id);
            if found {
                println!("Homework saved for lesson {id}");
            }
        }
        HomeworkAction::Toggle { date, id } => {
            let selector = DaySelector::Date(date.date);
            let found = session.toggle_completion(selector, id)?;
            report_miss(found, selector, id);
            if found {
                let completed = session
                    .effective_lessons(selector)
                    .iter()
                    .any(|l| (l.id == id || l.source_id == Some(id)) && l.completed);
                println!(
                    "Lesson {id}: {}",
                    if completed { "completed" } else { "not completed" }
                );
            }
        }
    }
    Ok(())
}
