use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Theme;
use crate::settlement::DailyRecord;
use crate::signals::{Cue, Severity};

/// Which tracker a completed goal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Exercise,
    Salah,
    Knowledge,
    CustomTask,
}

/// Every state change in the engine produces zero or more Events.
/// Collaborators (notifications, sound, the CLI) react to them; the engine
/// never waits on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
    GoalCompleted {
        kind: GoalKind,
        id: String,
        title: String,
        exp: u64,
        at: DateTime<Utc>,
    },
    StudyLogged {
        minutes: u32,
        total_minutes: u32,
        exp: u64,
        at: DateTime<Utc>,
    },
    DaySettled {
        record: DailyRecord,
        all_done: bool,
        streak: u32,
        at: DateTime<Utc>,
    },
    RecoveryActivated {
        streak: u32,
        at: DateTime<Utc>,
    },
    ThemeChanged {
        theme: Theme,
        at: DateTime<Utc>,
    },
    SoundToggled {
        enabled: bool,
        at: DateTime<Utc>,
    },
    ReflectionAdded {
        id: String,
        at: DateTime<Utc>,
    },
    CustomTaskAdded {
        id: String,
        title: String,
        at: DateTime<Utc>,
    },
    CustomTaskRemoved {
        id: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Message and severity for the notification collaborator, if any.
    pub fn notification(&self) -> Option<(String, Severity)> {
        match self {
            Event::LevelUp { level, .. } => Some((
                format!("LEVEL UP! You are now Level {level}. Strength Awakened."),
                Severity::Success,
            )),
            Event::GoalCompleted { kind, title, .. } => {
                let message = match kind {
                    GoalKind::Salah => format!("{title} observed."),
                    _ => format!("{title} fulfilled. Effort logged."),
                };
                Some((message, Severity::Success))
            }
            Event::DaySettled { all_done: true, .. } => Some((
                "Daily Trust Renewed. Physical Level Advanced.".to_string(),
                Severity::Success,
            )),
            Event::DaySettled { all_done: false, .. } => Some((
                "Stewardship Lapsed. Penalty Protocol Initiated.".to_string(),
                Severity::Warning,
            )),
            Event::RecoveryActivated { .. } => Some((
                "Recovery Active. Vessel stabilization initialized.".to_string(),
                Severity::Success,
            )),
            Event::ThemeChanged { theme, .. } => Some((
                format!(
                    "System Aesthetics Synchronized: {}",
                    theme.as_str().to_uppercase()
                ),
                Severity::Success,
            )),
            Event::StudyLogged { .. }
            | Event::SoundToggled { .. }
            | Event::ReflectionAdded { .. }
            | Event::CustomTaskAdded { .. }
            | Event::CustomTaskRemoved { .. } => None,
        }
    }

    /// Sound cue for the sound collaborator, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::LevelUp { .. } => Some(Cue::LevelUp),
            Event::GoalCompleted { .. } | Event::StudyLogged { .. } => Some(Cue::Success),
            Event::DaySettled { all_done: true, .. } => Some(Cue::Success),
            Event::DaySettled { all_done: false, .. } => Some(Cue::Warning),
            Event::RecoveryActivated { .. }
            | Event::ThemeChanged { .. }
            | Event::ReflectionAdded { .. }
            | Event::CustomTaskAdded { .. } => Some(Cue::Notification),
            Event::SoundToggled { .. } | Event::CustomTaskRemoved { .. } => None,
        }
    }
}
