mod config;
pub mod database;
pub mod repository;

pub use config::{Config, MonitorConfig, NotificationsConfig};
pub use database::Database;
pub use repository::{LoadedSchedule, ScheduleRepository};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `STUDYHELPER_HOME` wins when set. Otherwise `~/.config/studyhelper`, or
/// `~/.config/studyhelper-dev` with `STUDYHELPER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("STUDYHELPER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYHELPER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyhelper-dev")
            } else {
                base_dir.join("studyhelper")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
