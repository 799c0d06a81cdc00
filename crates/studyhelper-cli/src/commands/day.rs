//! Single-day views and resets.

use chrono::Local;
use clap::Subcommand;
use studyhelper_core::LessonPhase;

use super::{format_lesson, open_session, CliResult, ScopeArgs};

#[derive(Subcommand)]
pub enum DayAction {
    /// Show the effective lessons of a template weekday or a date
    Show {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop a date's own lessons and holiday flag so it follows the template again
    Reset {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Print whether a date differs from its weekday's template
    Modified {
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

pub fn run(action: DayAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        DayAction::Show { scope, json } => {
            let selector = scope.selector();
            let lessons = session.effective_lessons(selector);
            if json {
                println!("{}", serde_json::to_string_pretty(&lessons)?);
                return Ok(());
            }
            let mut header = selector.to_string();
            if selector.date().is_some() {
                header.push_str(&format!(" ({})", selector.weekday()));
            }
            if session.is_holiday(selector) {
                header.push_str(" [holiday]");
            }
            if session.is_modified(selector) {
                header.push_str(" [modified]");
            }
            println!("{header}");
            if lessons.is_empty() {
                println!("  no lessons");
            }
            for lesson in &lessons {
                println!("  {}", format_lesson(lesson));
            }
            let now = Local::now().naive_local();
            let current = session
                .data()
                .current_or_next_for(selector, now.date(), now.time());
            if let Some(current) = current {
                if let (Some(lesson), Some(countdown)) =
                    (&current.lesson, current.countdown(now.time()))
                {
                    let verb = match current.phase {
                        LessonPhase::EndsIn => "ends",
                        _ => "starts",
                    };
                    println!("now: {} {verb} in {countdown}", lesson.label());
                }
            }
        }
        DayAction::Reset { scope } => {
            let selector = scope.selector();
            if selector.is_template() {
                return Err("only dates can be reset to the template".into());
            }
            if session.reset_to_template(selector)? {
                println!("{selector}: reset to template");
            } else {
                println!("{selector}: already follows the template");
            }
        }
        DayAction::Modified { scope } => {
            println!("{}", session.is_modified(scope.selector()));
        }
    }
    Ok(())
}
