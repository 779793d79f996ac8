//! Engine: owns the [`HabitState`] and applies every operation atomically.
//!
//! Each command runs against a copy of the state; the copy replaces the
//! live state only once the transition has finished, so an observer never
//! sees a half-applied change. After a change the state is handed to the
//! configured [`StateSink`]. A sink failure is logged and otherwise
//! ignored: the in-memory state stays authoritative.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = Engine::new(store.load(Utc::now())).with_sink(store);
//! engine.settle_if_due(&Local::now());
//! let events = engine.update_exercise_progress(ExerciseId::Pushups, 25);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::error::{StorageError, ValidationError};
use crate::events::Event;
use crate::goals::{ExerciseId, NewCustomTask, SalahId};
use crate::profile::Theme;
use crate::state::HabitState;

/// Destination for state snapshots after each change.
pub trait StateSink {
    fn persist(&self, state: &HabitState) -> Result<(), StorageError>;
}

pub struct Engine {
    state: HabitState,
    sink: Option<Box<dyn StateSink>>,
}

impl Engine {
    pub fn new(state: HabitState) -> Self {
        Self { state, sink: None }
    }

    pub fn with_sink(mut self, sink: impl StateSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn state(&self) -> &HabitState {
        &self.state
    }

    pub fn into_state(self) -> HabitState {
        self.state
    }

    pub fn target(&self, id: ExerciseId) -> u32 {
        self.state.target(id)
    }

    fn persist(&self) {
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.persist(&self.state) {
                tracing::warn!(error = %e, "failed to persist state");
            }
        }
    }

    fn commit(&mut self, next: HabitState) {
        if next != self.state {
            self.state = next;
            self.persist();
        }
    }

    /// Run a fallible transition on a copy; invalid input leaves the state
    /// untouched and yields no events.
    fn transact<F>(&mut self, op: &'static str, f: F) -> Vec<Event>
    where
        F: FnOnce(&mut HabitState, DateTime<Utc>) -> Result<Vec<Event>, ValidationError>,
    {
        let mut next = self.state.clone();
        match f(&mut next, Utc::now()) {
            Ok(events) => {
                self.commit(next);
                events
            }
            Err(err) => {
                tracing::debug!(op, error = %err, "input ignored");
                Vec::new()
            }
        }
    }

    pub fn update_exercise_progress(&mut self, id: ExerciseId, value: i64) -> Vec<Event> {
        self.transact("update_exercise_progress", |s, at| {
            s.update_exercise_progress(id, value, at)
        })
    }

    pub fn increment_exercise(&mut self, id: ExerciseId, delta: i64) -> Vec<Event> {
        self.transact("increment_exercise", |s, at| {
            s.increment_exercise(id, delta, at)
        })
    }

    pub fn toggle_salah(&mut self, id: SalahId) -> Vec<Event> {
        self.transact("toggle_salah", |s, at| s.toggle_salah(id, at))
    }

    pub fn update_knowledge(&mut self, id: &str, minutes: i64) -> Vec<Event> {
        self.transact("update_knowledge", |s, at| {
            s.update_knowledge(id, minutes, at)
        })
    }

    pub fn add_study_minutes(&mut self, minutes: i64) -> Vec<Event> {
        self.transact("add_study_minutes", |s, at| s.add_study_minutes(minutes, at))
    }

    pub fn add_custom_task(&mut self, task: NewCustomTask) -> Vec<Event> {
        let id = Uuid::new_v4().to_string();
        self.transact("add_custom_task", |s, at| s.add_custom_task(task, id, at))
    }

    pub fn update_custom_task(&mut self, id: &str, value: i64) -> Vec<Event> {
        self.transact("update_custom_task", |s, at| {
            s.update_custom_task(id, value, at)
        })
    }

    pub fn increment_custom_task(&mut self, id: &str, delta: i64) -> Vec<Event> {
        self.transact("increment_custom_task", |s, at| {
            s.increment_custom_task(id, delta, at)
        })
    }

    pub fn remove_custom_task(&mut self, id: &str) -> Vec<Event> {
        self.transact("remove_custom_task", |s, at| s.remove_custom_task(id, at))
    }

    pub fn add_reflection(&mut self, note: &str, category: &str) -> Vec<Event> {
        let id = Uuid::new_v4().to_string();
        self.transact("add_reflection", |s, at| {
            s.add_reflection(note, category, id, at)
        })
    }

    pub fn set_theme(&mut self, theme: Theme) -> Vec<Event> {
        self.transact("set_theme", |s, at| s.set_theme(theme, at))
    }

    pub fn toggle_sound(&mut self) -> Vec<Event> {
        self.transact("toggle_sound", |s, at| s.toggle_sound(at))
    }

    pub fn activate_recovery(&mut self) -> Vec<Event> {
        self.transact("activate_recovery", |s, at| Ok(s.activate_recovery(at)))
    }

    /// Poll hook: settles when `now` is on a new calendar day.
    pub fn settle_if_due<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Vec<Event> {
        let mut next = self.state.clone();
        let events = next.settle_if_due(now);
        self.commit(next);
        events
    }
}
