//! Foreground run of the background monitor.

use clap::Args;
use studyhelper_core::monitor::MonitorRunner;
use studyhelper_core::{Config, Database, Event};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::CliResult;

#[derive(Args)]
pub struct MonitorArgs {
    /// Print every event as a JSON line
    #[arg(long)]
    json: bool,
}

pub fn run(args: MonitorArgs) -> CliResult {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch(args))
}

async fn watch(args: MonitorArgs) -> CliResult {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    let task = MonitorRunner::new(db, tx, cancel.clone())
        .with_config(&config)
        .spawn();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping monitor");
        }
        ctrl_c.cancel();
    });

    let mut last_summary = String::new();
    while let Some(event) = rx.recv().await {
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
            continue;
        }
        match event {
            Event::LessonStarted { title, body, at, .. }
            | Event::LessonEnded { title, body, at, .. } => {
                println!("[{}] {title}: {body}", at.format("%H:%M:%S"));
            }
            Event::StatusUpdated { summary, .. } => {
                if summary != last_summary {
                    println!("{summary}");
                    last_summary = summary;
                }
            }
            Event::DataReloaded { .. } => {}
        }
    }

    task.await?;
    Ok(())
}
