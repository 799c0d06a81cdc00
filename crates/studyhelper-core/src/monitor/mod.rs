//! Background lesson monitor.
//!
//! [`LessonMonitor`] is the pure started/ended state machine;
//! [`MonitorRunner`] drives it from a cancellable tokio task.

mod engine;
mod runner;

pub use engine::{Alert, AlertKind, LessonMonitor, MonitorState, MonitorTick, StatusLine};
pub use runner::{Clock, MonitorRunner};
