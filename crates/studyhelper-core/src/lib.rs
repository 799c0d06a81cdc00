//! # Study Helper Core Library
//!
//! This library provides the core logic for the Study Helper class-schedule
//! tracker. Every operation is available through the `studyhelper` CLI; any
//! other front end is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Schedule Store**: the weekly template plus per-date overrides and
//!   holiday sets, with copy-on-write materialization of dates
//! - **Resolution Engine**: effective lessons for a day, the "modified"
//!   diff and the current-or-next lesson countdown
//! - **Background Monitor**: a once-per-second state machine that emits
//!   lesson started/ended alerts and a status line
//! - **Storage**: SQLite key-value snapshot and TOML configuration
//!
//! ## Key Components
//!
//! - [`ScheduleStore`]: in-memory schedule and its mutations
//! - [`ScheduleSession`]: store plus write-through persistence and reload signal
//! - [`LessonMonitor`] / [`MonitorRunner`]: monitor state machine and its task
//! - [`Database`]: snapshot persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod lesson;
pub mod monitor;
pub mod schedule;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, ImportError};
pub use events::Event;
pub use lesson::{IdAllocator, Lesson, LessonFields, LessonId, SubjectColor};
pub use monitor::{LessonMonitor, MonitorRunner, StatusLine};
pub use schedule::{
    CurrentOrNext, DayOfWeek, DaySelector, LessonPhase, ScheduleData, ScheduleStore,
};
pub use session::{ReloadSignal, ScheduleSession};
pub use storage::{Config, Database, ScheduleRepository};
