//! Goal tracker: today's exercises, prayers, knowledge quests, study
//! minutes and the user's custom tasks.

mod custom;
mod exercise;
mod knowledge;
mod salah;
mod tracker;

pub use custom::{CustomTask, NewCustomTask, TaskCategory, TrackingMode, DEFAULT_EXP_REWARD};
pub use exercise::{compute_target, Exercise, ExerciseId};
pub use knowledge::{KnowledgeCategory, KnowledgeQuest};
pub use salah::{Salah, SalahId};

use serde::{Deserialize, Serialize};

/// Cumulative study minutes that count as the day's intellectual goal.
pub const STUDY_THRESHOLD_MINUTES: u32 = 25;

/// Experience paid on first completion, per entity class.
pub const EXERCISE_REWARD: u64 = 10;
pub const KNOWLEDGE_REWARD: u64 = 15;
pub const SALAH_REWARD: u64 = 5;
pub const REFLECTION_REWARD: u64 = 5;

/// Minutes of study per experience point.
pub const STUDY_MINUTES_PER_EXP: u32 = 5;

/// Clamp a requested progress value into `[0, target]`.
pub fn clamp_progress(requested: i64, target: u32) -> u32 {
    requested.clamp(0, i64::from(target)) as u32
}

/// The per-day entity sets. Reset to their seeds at every settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub exercises: Vec<Exercise>,
    pub salah: Vec<Salah>,
    pub knowledge: Vec<KnowledgeQuest>,
    pub study_minutes: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self::seed()
    }
}

impl DailyGoals {
    pub fn seed() -> Self {
        Self {
            exercises: Exercise::seeds(),
            salah: Salah::seeds(),
            knowledge: KnowledgeQuest::seeds(),
            study_minutes: 0,
        }
    }

    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn knowledge_quest(&self, id: &str) -> Option<&KnowledgeQuest> {
        self.knowledge.iter().find(|k| k.id == id)
    }

    pub fn salah_completed(&self) -> usize {
        self.salah.iter().filter(|s| s.completed).count()
    }

    pub fn knowledge_completed(&self) -> usize {
        self.knowledge.iter().filter(|k| k.is_completed()).count()
    }

    pub fn study_goal_met(&self) -> bool {
        self.study_minutes >= STUDY_THRESHOLD_MINUTES
    }
}
