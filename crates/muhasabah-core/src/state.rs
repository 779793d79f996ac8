//! The single owned state aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::goals::{clamp_progress, compute_target, DailyGoals, Exercise, ExerciseId};
use crate::profile::Profile;

/// Profile plus today's goal collections.
///
/// Every transition on this type is synchronous and pure apart from the
/// events it pushes; the [`Engine`](crate::Engine) applies them to a copy
/// and swaps the result in whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitState {
    pub profile: Profile,
    pub goals: DailyGoals,
}

impl HabitState {
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            profile: Profile::seed(now),
            goals: DailyGoals::seed(),
        }
    }

    /// Today's target for an exercise. Never cached.
    pub fn target(&self, id: ExerciseId) -> u32 {
        let debt = self.profile.penalty_debt.get(id);
        let level = self.profile.level();
        let recovery = self.profile.recovery_privilege_used;
        match self.goals.exercise(id) {
            Some(exercise) => compute_target(exercise, level, debt, recovery),
            None => compute_target(&Exercise::seed(id), level, debt, recovery),
        }
    }

    pub fn exercise_completed(&self, id: ExerciseId) -> bool {
        let target = self.target(id);
        self.goals
            .exercise(id)
            .map(|e| e.is_completed(target))
            .unwrap_or(false)
    }

    /// Number of standard exercises currently at or above target.
    pub fn exercises_completed(&self) -> usize {
        ExerciseId::ALL
            .iter()
            .filter(|id| self.exercise_completed(**id))
            .count()
    }

    pub fn all_exercises_completed(&self) -> bool {
        ExerciseId::ALL.iter().all(|id| self.exercise_completed(*id))
    }

    /// Pull every exercise's progress back under its current target.
    pub fn clamp_exercise_progress(&mut self) {
        let targets: Vec<u32> = self.goals.exercises.iter().map(|e| self.target(e.id)).collect();
        for (exercise, target) in self.goals.exercises.iter_mut().zip(targets) {
            exercise.current_progress =
                clamp_progress(i64::from(exercise.current_progress), target);
        }
    }

    /// Credit experience, pushing one `LevelUp` per level crossed.
    pub(crate) fn award(&mut self, amount: u64, at: DateTime<Utc>, events: &mut Vec<Event>) {
        for level in self.profile.ledger.award(amount) {
            tracing::info!(level, "level up");
            events.push(Event::LevelUp { level, at });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_uses_level_debt_and_recovery() {
        let mut state = HabitState::seed(Utc::now());
        state.profile.ledger.level = 3;
        assert_eq!(state.target(ExerciseId::Plank), 60 + 30);
        assert_eq!(state.target(ExerciseId::Pushups), 20 + 10);

        state.profile.penalty_debt.set(ExerciseId::Pushups, 35);
        assert_eq!(state.target(ExerciseId::Pushups), 65);

        state.profile.recovery_privilege_used = true;
        assert_eq!(state.target(ExerciseId::Pushups), 32);
    }

    #[test]
    fn award_emits_level_up_events() {
        let mut state = HabitState::seed(Utc::now());
        let mut events = Vec::new();
        state.award(100, Utc::now(), &mut events);
        assert_eq!(state.profile.level(), 2);
        assert!(matches!(events.as_slice(), [Event::LevelUp { level: 2, .. }]));
    }
}
