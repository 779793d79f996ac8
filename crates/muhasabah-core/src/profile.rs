//! The root aggregate: one profile per installation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::goals::{CustomTask, ExerciseId};
use crate::progression::Ledger;
use crate::settlement::DailyRecord;

/// Carried-over deficit per exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyDebt {
    #[serde(default)]
    pub pushups: u32,
    #[serde(default)]
    pub squats: u32,
    #[serde(default)]
    pub situps: u32,
    #[serde(default)]
    pub plank: u32,
}

impl PenaltyDebt {
    pub fn get(&self, id: ExerciseId) -> u32 {
        match id {
            ExerciseId::Pushups => self.pushups,
            ExerciseId::Squats => self.squats,
            ExerciseId::Situps => self.situps,
            ExerciseId::Plank => self.plank,
        }
    }

    pub fn set(&mut self, id: ExerciseId, value: u32) {
        let slot = match id {
            ExerciseId::Pushups => &mut self.pushups,
            ExerciseId::Squats => &mut self.squats,
            ExerciseId::Situps => &mut self.situps,
            ExerciseId::Plank => &mut self.plank,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = PenaltyDebt::default();
    }

    pub fn has_any(&self) -> bool {
        ExerciseId::ALL.iter().any(|id| self.get(*id) > 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Emerald,
    Blue,
    Red,
    Gold,
    Violet,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Emerald,
        Theme::Blue,
        Theme::Red,
        Theme::Gold,
        Theme::Violet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Emerald => "emerald",
            Theme::Blue => "blue",
            Theme::Red => "red",
            Theme::Gold => "gold",
            Theme::Violet => "violet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Emerald => "Emerald",
            Theme::Blue => "Monarch",
            Theme::Red => "Frenzy",
            Theme::Gold => "Royal",
            Theme::Violet => "Abyssal",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("'{s}' is not one of emerald, blue, red, gold, violet"),
            })
    }
}

/// A dated journal note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: String,
    pub date: DateTime<Utc>,
    pub note: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(flatten)]
    pub ledger: Ledger,
    /// Consecutive fully-successful settlements.
    pub streak: u32,
    pub penalty_debt: PenaltyDebt,
    pub recovery_privilege_used: bool,
    /// Only the calendar day of this timestamp is meaningful.
    pub last_reset_date: DateTime<Utc>,
    pub custom_tasks: Vec<CustomTask>,
    /// Newest first, at most seven entries.
    pub weekly_history: Vec<DailyRecord>,
    pub reflections: Vec<Reflection>,
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Profile {
    /// First-launch profile. `now` becomes the last reset date so a fresh
    /// install does not settle an empty day.
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            name: "Servant".to_string(),
            title: "Seeker of Discipline".to_string(),
            ledger: Ledger::default(),
            streak: 0,
            penalty_debt: PenaltyDebt::default(),
            recovery_privilege_used: false,
            last_reset_date: now,
            custom_tasks: Vec::new(),
            weekly_history: Vec::new(),
            reflections: Vec::new(),
            theme: Theme::default(),
            sound_enabled: true,
        }
    }

    pub fn level(&self) -> u32 {
        self.ledger.level
    }

    pub fn custom_task(&self, id: &str) -> Option<&CustomTask> {
        self.custom_tasks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_get_set_by_exercise() {
        let mut debt = PenaltyDebt::default();
        assert!(!debt.has_any());
        debt.set(ExerciseId::Plank, 40);
        assert_eq!(debt.get(ExerciseId::Plank), 40);
        assert!(debt.has_any());
        debt.clear();
        assert_eq!(debt, PenaltyDebt::default());
    }

    #[test]
    fn theme_membership_is_enforced() {
        assert_eq!("GOLD".parse::<Theme>().unwrap(), Theme::Gold);
        assert!("pink".parse::<Theme>().is_err());
    }

    #[test]
    fn profile_serializes_flat_ledger_fields() {
        let profile = Profile::seed(Utc::now());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["nextLevelExp"], 100);
        assert_eq!(json["penaltyDebt"]["plank"], 0);
        assert_eq!(json["theme"], "emerald");
    }
}
