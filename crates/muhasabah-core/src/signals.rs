//! Collaborator seams for notifications and sound.
//!
//! The engine only produces [`Event`]s. [`dispatch`] forwards them to
//! whatever notifier and sound player the host provides. Playback failures
//! are swallowed here and never reach the engine.

use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    LevelUp,
    Success,
    Notification,
    Warning,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::LevelUp => "levelup",
            Cue::Success => "success",
            Cue::Notification => "notification",
            Cue::Warning => "warning",
        }
    }
}

pub type PlaybackError = Box<dyn std::error::Error + Send + Sync>;

/// Displays a message. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Plays a cue. Errors are reported but ignored by [`dispatch`].
pub trait SoundPlayer {
    fn play(&self, cue: Cue) -> Result<(), PlaybackError>;
}

/// Notifier that drops everything.
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _message: &str, _severity: Severity) {}
}

impl SoundPlayer for Silent {
    fn play(&self, _cue: Cue) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Forward events to the collaborators. Sound is skipped entirely when the
/// profile has it turned off.
pub fn dispatch(
    events: &[Event],
    sound_enabled: bool,
    notifier: &dyn Notifier,
    sound: &dyn SoundPlayer,
) {
    for event in events {
        if let Some((message, severity)) = event.notification() {
            notifier.notify(&message, severity);
        }
        if !sound_enabled {
            continue;
        }
        if let Some(cue) = event.cue() {
            if let Err(e) = sound.play(cue) {
                tracing::debug!(cue = cue.as_str(), error = %e, "sound playback failed");
            }
        }
    }
}
