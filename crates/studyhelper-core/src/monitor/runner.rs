//! Monitor background loop.
//!
//! Spawns a tokio task that ticks a [`LessonMonitor`] on a fixed period
//! and publishes the resulting [`Event`]s on an unbounded channel. The
//! snapshot is re-read from the repository when the in-process reload
//! signal fires or when the persisted revision moved (another process
//! saved).

use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::engine::LessonMonitor;
use crate::events::Event;
use crate::schedule::ScheduleData;
use crate::storage::{Config, ScheduleRepository};

/// Source of "now" in local wall-clock time.
pub type Clock = Box<dyn Fn() -> NaiveDateTime + Send>;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct MonitorRunner<S: ScheduleRepository + Send + 'static> {
    source: S,
    data: ScheduleData,
    monitor: LessonMonitor,
    events: mpsc::UnboundedSender<Event>,
    reload: Option<watch::Receiver<u64>>,
    cancel: CancellationToken,
    tick_interval: Duration,
    clock: Clock,
    /// Revision of the snapshot in `data`; `None` before the first load.
    revision: Option<u64>,
    status_enabled: bool,
    alerts_enabled: bool,
}

impl<S: ScheduleRepository + Send + 'static> MonitorRunner<S> {
    pub fn new(
        source: S,
        events: mpsc::UnboundedSender<Event>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            data: ScheduleData::default(),
            monitor: LessonMonitor::default(),
            events,
            reload: None,
            cancel,
            tick_interval: Duration::from_secs(1),
            clock: Box::new(local_now),
            revision: None,
            status_enabled: true,
            alerts_enabled: true,
        }
    }

    /// Apply the `[monitor]` and `[notifications]` settings.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.tick_interval = config.monitor.tick_interval();
        self.monitor = LessonMonitor::new(config.monitor.fresh_start_window());
        self.status_enabled = config.notifications.enabled;
        self.alerts_enabled = config.notifications.alerts;
        self
    }

    /// Re-read the snapshot whenever this receiver sees a new value.
    pub fn with_reload(mut self, reload: watch::Receiver<u64>) -> Self {
        self.reload = Some(reload);
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run until the token is cancelled or every event receiver is gone.
    pub async fn run(mut self) {
        info!(interval_ms = self.tick_interval.as_millis() as u64, "lesson monitor started");

        let cancel = self.cancel.clone();
        let mut reload = self.reload.take();
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("lesson monitor cancelled");
                    break;
                }
                changed = reload_changed(&mut reload) => {
                    if changed {
                        if !self.reload_snapshot() {
                            break;
                        }
                    } else {
                        debug!("reload signal closed");
                        reload = None;
                    }
                }
                _ = interval.tick() => {
                    if !self.tick() {
                        debug!("event receiver dropped, stopping monitor");
                        break;
                    }
                }
            }
        }
    }

    /// One monitor step. Returns false once nobody is listening.
    pub fn tick(&mut self) -> bool {
        match self.source.revision() {
            Ok(revision) if self.revision != Some(revision) => {
                if !self.reload_snapshot() {
                    return false;
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not read schedule revision"),
        }

        let now = (self.clock)();
        let tick = self.monitor.tick(&self.data, now);

        for alert in tick.alerts {
            info!(
                kind = ?alert.kind,
                lesson_id = alert.lesson_id,
                body = %alert.body,
                "lesson alert"
            );
            if self.alerts_enabled && self.events.send(alert.into_event(now)).is_err() {
                return false;
            }
        }
        if self.status_enabled && self.events.send(tick.status.to_event(now)).is_err() {
            return false;
        }
        !self.events.is_closed()
    }

    /// Replace the in-memory snapshot from the repository. Keys that fail to
    /// parse keep their previous value.
    fn reload_snapshot(&mut self) -> bool {
        let loaded = match self.source.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "could not reload schedule");
                return true;
            }
        };
        let revision = loaded.revision;
        loaded.merge_into(&mut self.data);
        self.revision = Some(revision);
        debug!(revision, "schedule reloaded");

        self.events
            .send(Event::DataReloaded {
                revision,
                at: (self.clock)(),
            })
            .is_ok()
    }
}

async fn reload_changed(reload: &mut Option<watch::Receiver<u64>>) -> bool {
    match reload {
        Some(rx) => rx.changed().await.is_ok(),
        None => std::future::pending().await,
    }
}
