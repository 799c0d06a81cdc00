//! Current-or-next lesson for today.

use chrono::Local;
use clap::Args;
use serde::Serialize;
use studyhelper_core::{CurrentOrNext, StatusLine};

use super::{open_session, CliResult};

#[derive(Args)]
pub struct NowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct NowOutput {
    #[serde(flatten)]
    result: CurrentOrNext,
    countdown: Option<String>,
    summary: String,
}

pub fn run(args: NowArgs) -> CliResult {
    let session = open_session()?;
    let now = Local::now().naive_local();
    let result = session.current_or_next(now.date(), now.time());
    let summary = StatusLine::compute(session.data(), now).to_string();

    if args.json {
        let output = NowOutput {
            countdown: result.countdown(now.time()),
            result,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
