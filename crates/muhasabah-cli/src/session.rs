//! One CLI invocation's view of the engine.
//!
//! Opening a session loads the stored state, settles a pending day, and
//! wires the store in as the engine's sink. Events from every operation are
//! forwarded to the terminal notifier and bell.

use chrono::{Local, Utc};
use muhasabah_core::storage::state_store::PROFILE_KEY;
use muhasabah_core::signals::PlaybackError;
use muhasabah_core::{
    dispatch, Config, Cue, Engine, Event, HabitState, Notifier, Result, Severity, SoundPlayer,
    StateStore,
};
use std::io::Write;

/// Prints notifications to stderr so stdout stays parseable.
pub struct TerminalNotifier {
    pub enabled: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if !self.enabled {
            return;
        }
        match severity {
            Severity::Success => eprintln!("[+] {message}"),
            Severity::Warning => eprintln!("[!] {message}"),
        }
    }
}

/// Rings the terminal bell for every cue.
pub struct TerminalBell {
    pub enabled: bool,
}

impl SoundPlayer for TerminalBell {
    fn play(&self, _cue: Cue) -> std::result::Result<(), PlaybackError> {
        if !self.enabled {
            return Ok(());
        }
        let mut stderr = std::io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

pub struct Session {
    engine: Engine,
    config: Config,
    json: bool,
    startup: Vec<Event>,
}

impl Session {
    /// `json` forces JSON output; otherwise the config default applies.
    pub fn open(json: bool) -> Result<Self> {
        let config = Config::load_or_default();
        let store = StateStore::open()?;
        let (state, report) = store.load_with_report(Utc::now());

        // Fix the first-run reset date on disk, otherwise every run would
        // re-seed it to "now".
        if report.seeded.contains(&PROFILE_KEY) {
            if let Err(e) = store.save(&state) {
                tracing::warn!(error = %e, "failed to store seed state");
            }
        }
        if !report.migrated.is_empty() {
            tracing::info!(records = ?report.migrated, "migrated stored records");
        }

        let json = json || config.display.json;
        let mut session = Self {
            engine: Engine::new(state).with_sink(store),
            config,
            json,
            startup: Vec::new(),
        };
        session.startup = session.apply(|engine| engine.settle_if_due(&Local::now()));
        Ok(session)
    }

    pub fn state(&self) -> &HabitState {
        self.engine.state()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn json(&self) -> bool {
        self.json
    }

    /// Events produced while opening (a settled day).
    pub fn startup_events(&self) -> &[Event] {
        &self.startup
    }

    /// Run one engine operation and dispatch its events.
    pub fn apply<F>(&mut self, op: F) -> Vec<Event>
    where
        F: FnOnce(&mut Engine) -> Vec<Event>,
    {
        let events = op(&mut self.engine);
        dispatch(
            &events,
            self.engine.state().profile.sound_enabled,
            &TerminalNotifier {
                enabled: self.config.notifications.enabled,
            },
            &TerminalBell {
                enabled: self.config.sound.terminal_bell,
            },
        );
        events
    }

    /// Report input the engine would ignore. The reason goes to stderr as a
    /// notice; JSON mode still prints an empty event list.
    pub fn skip(&self, reason: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
        tracing::debug!(reason, "operation skipped");
        eprintln!("notice: {reason}");
        if self.json {
            println!("[]");
        }
        Ok(())
    }

    /// Print the outcome of an operation: the events as JSON, or `summary`
    /// as text.
    pub fn report(
        &self,
        events: &[Event],
        summary: impl FnOnce(&HabitState) -> String,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(events)?);
        } else {
            println!("{}", summary(self.state()));
        }
        Ok(())
    }
}
