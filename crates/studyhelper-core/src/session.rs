//! Interactive editing session.
//!
//! Wraps a [`ScheduleStore`] with its repository: every mutation is written
//! through synchronously and then announced on the [`ReloadSignal`] so a
//! monitor in the same process re-reads before its next tick. Monitors in
//! other processes notice the bumped revision instead.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::lesson::{IdAllocator, Lesson, LessonFields, LessonId};
use crate::schedule::{self, CurrentOrNext, DaySelector, ScheduleData, ScheduleStore};
use crate::storage::ScheduleRepository;

/// No-payload "data changed" notification. The value is the saved revision.
#[derive(Debug, Clone)]
pub struct ReloadSignal {
    tx: Arc<watch::Sender<u64>>,
}

impl ReloadSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn notify(&self, revision: u64) {
        self.tx.send_modify(|current| *current = revision);
    }
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScheduleSession<R: ScheduleRepository> {
    store: ScheduleStore,
    repo: R,
    reload: ReloadSignal,
}

impl<R: ScheduleRepository> ScheduleSession<R> {
    /// Load the persisted snapshot. Keys that fail to parse are skipped and
    /// the session starts from defaults for them.
    pub fn open(repo: R, reload: ReloadSignal) -> Result<Self> {
        let loaded = match repo.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "could not read persisted schedule, starting empty");
                Default::default()
            }
        };
        let ids = IdAllocator::starting_at(loaded.next_lesson_id.unwrap_or_default());
        let mut data = ScheduleData::default();
        loaded.merge_into(&mut data);

        Ok(Self {
            store: ScheduleStore::from_data(data, ids),
            repo,
            reload,
        })
    }

    pub fn data(&self) -> &ScheduleData {
        self.store.data()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn reload_signal(&self) -> &ReloadSignal {
        &self.reload
    }

    fn commit(&self) -> Result<()> {
        let revision = self.repo.save(self.store.data(), self.store.ids().peek())?;
        debug!(revision, "schedule saved");
        self.reload.notify(revision);
        Ok(())
    }

    /// Run one mutation and persist it. A failed save rolls the store back,
    /// so memory never runs ahead of storage.
    fn apply<T>(&mut self, mutation: impl FnOnce(&mut ScheduleStore) -> T) -> Result<T> {
        let before = self.store.clone();
        let out = mutation(&mut self.store);
        if let Err(e) = self.commit() {
            self.store = before;
            return Err(e);
        }
        Ok(out)
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn effective_lessons(&self, selector: DaySelector) -> Vec<Lesson> {
        self.store.data().effective_lessons(selector)
    }

    pub fn is_holiday(&self, selector: DaySelector) -> bool {
        self.store.data().is_holiday(selector)
    }

    pub fn is_modified(&self, selector: DaySelector) -> bool {
        self.store.data().is_modified(selector)
    }

    pub fn current_or_next(&self, date: NaiveDate, time: NaiveTime) -> CurrentOrNext {
        self.store.data().current_or_next(date, time)
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn add_lesson(&mut self, scope: DaySelector, fields: LessonFields) -> Result<LessonId> {
        self.apply(|store| store.add_lesson(scope, fields))
    }

    pub fn edit_lesson(
        &mut self,
        scope: DaySelector,
        id: LessonId,
        fields: LessonFields,
    ) -> Result<bool> {
        self.apply(|store| store.edit_lesson(scope, id, fields))
    }

    pub fn delete_lesson(&mut self, scope: DaySelector, id: LessonId) -> Result<bool> {
        self.apply(|store| store.delete_lesson(scope, id))
    }

    pub fn toggle_completion(&mut self, scope: DaySelector, id: LessonId) -> Result<bool> {
        self.apply(|store| store.toggle_completion(scope, id))
    }

    pub fn set_homework(&mut self, scope: DaySelector, id: LessonId, text: &str) -> Result<bool> {
        self.apply(|store| store.set_homework(scope, id, text))
    }

    /// Returns the new holiday status.
    pub fn toggle_holiday(&mut self, scope: DaySelector) -> Result<bool> {
        self.apply(|store| store.toggle_holiday(scope))
    }

    pub fn reset_to_template(&mut self, scope: DaySelector) -> Result<bool> {
        self.apply(|store| store.reset_to_template(scope))
    }

    // ── Backup ───────────────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String> {
        Ok(schedule::export_json(self.store.data())?)
    }

    /// Replace everything with the document's contents. On any error, parse,
    /// validation or save, nothing changes.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let data = schedule::import_json(json)?;
        let lessons = data.lessons().count();
        self.apply(|store| store.replace(data))?;
        info!(lessons, "imported schedule");
        Ok(())
    }
}
