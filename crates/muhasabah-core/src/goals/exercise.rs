//! The four fixed physical exercises and their target formula.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseId {
    Pushups,
    Squats,
    Situps,
    Plank,
}

impl ExerciseId {
    pub const ALL: [ExerciseId; 4] = [
        ExerciseId::Pushups,
        ExerciseId::Squats,
        ExerciseId::Situps,
        ExerciseId::Plank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseId::Pushups => "pushups",
            ExerciseId::Squats => "squats",
            ExerciseId::Situps => "situps",
            ExerciseId::Plank => "plank",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExerciseId::Pushups => "Push-ups",
            ExerciseId::Squats => "Squats",
            ExerciseId::Situps => "Sit-ups",
            ExerciseId::Plank => "Plank",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ExerciseId::Plank => "sec",
            _ => "reps",
        }
    }

    /// Target at level 1 with no debt.
    pub fn base_target(&self) -> u32 {
        match self {
            ExerciseId::Pushups => 20,
            ExerciseId::Squats => 30,
            ExerciseId::Situps => 20,
            ExerciseId::Plank => 60,
        }
    }

    /// Target growth per level above 1. Plank is measured in seconds held,
    /// so it grows faster than the rep-counted exercises.
    pub fn level_step(&self) -> u32 {
        match self {
            ExerciseId::Plank => 15,
            _ => 5,
        }
    }
}

impl std::fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::unknown("exercise", s))
    }
}

/// One day's progress on a fixed exercise.
///
/// Completion is never stored: it is `current_progress >= target`, where
/// the target comes from [`compute_target`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub base_target: u32,
    pub current_progress: u32,
    /// Set once the completion reward has been paid for the day.
    #[serde(default)]
    pub reward_claimed: bool,
}

impl Exercise {
    pub fn seed(id: ExerciseId) -> Self {
        Self {
            id,
            base_target: id.base_target(),
            current_progress: 0,
            reward_claimed: false,
        }
    }

    pub fn seeds() -> Vec<Exercise> {
        ExerciseId::ALL.into_iter().map(Exercise::seed).collect()
    }

    pub fn is_completed(&self, target: u32) -> bool {
        self.current_progress >= target
    }
}

/// Today's target for an exercise.
///
/// `base + (level - 1) * step + debt`, halved (floored, minimum 1) while the
/// recovery privilege is active. Recomputed on every read.
pub fn compute_target(exercise: &Exercise, level: u32, debt: u32, recovery_active: bool) -> u32 {
    let boost = level.saturating_sub(1).saturating_mul(exercise.id.level_step());
    let target = exercise
        .base_target
        .saturating_add(boost)
        .saturating_add(debt);
    if recovery_active {
        (target / 2).max(1)
    } else {
        target
    }
}
