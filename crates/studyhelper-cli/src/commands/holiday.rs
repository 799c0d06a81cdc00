//! Holiday commands for CLI.

use clap::Subcommand;

use super::{open_session, CliResult, ScopeArgs};

#[derive(Subcommand)]
pub enum HolidayAction {
    /// Flip the holiday flag of a template weekday or a date.
    /// Marking a template weekday clears its lessons.
    Toggle {
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

pub fn run(action: HolidayAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        HolidayAction::Toggle { scope } => {
            let selector = scope.selector();
            if session.toggle_holiday(selector)? {
                println!("{selector}: holiday");
            } else {
                println!("{selector}: regular day");
            }
        }
    }
    Ok(())
}
