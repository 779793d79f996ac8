//! Recovery privilege: after a five-day streak the user may halve every
//! exercise target for the rest of the day. Consumed by the next
//! settlement whatever its outcome.

use chrono::{DateTime, Utc};

use crate::events::Event;
use crate::state::HabitState;

/// Streak required before recovery can be activated.
pub const RECOVERY_STREAK: u32 = 5;

impl HabitState {
    pub fn can_activate_recovery(&self) -> bool {
        self.profile.streak >= RECOVERY_STREAK && !self.profile.recovery_privilege_used
    }

    /// Activate recovery. A no-op (no events) when the streak is too short
    /// or the privilege is already in use today.
    pub fn activate_recovery(&mut self, at: DateTime<Utc>) -> Vec<Event> {
        if !self.can_activate_recovery() {
            tracing::debug!(
                streak = self.profile.streak,
                used = self.profile.recovery_privilege_used,
                "recovery unavailable"
            );
            return Vec::new();
        }
        self.profile.recovery_privilege_used = true;
        self.clamp_exercise_progress();
        tracing::info!(streak = self.profile.streak, "recovery activated");
        vec![Event::RecoveryActivated {
            streak: self.profile.streak,
            at,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::ExerciseId;

    #[test]
    fn requires_five_day_streak() {
        let mut state = HabitState::seed(Utc::now());
        state.profile.streak = 4;
        assert!(state.activate_recovery(Utc::now()).is_empty());
        assert!(!state.profile.recovery_privilege_used);
    }

    #[test]
    fn halves_targets_and_is_single_use() {
        let mut state = HabitState::seed(Utc::now());
        state.profile.streak = 5;
        let before: Vec<u32> = ExerciseId::ALL.iter().map(|id| state.target(*id)).collect();

        let events = state.activate_recovery(Utc::now());
        assert_eq!(events.len(), 1);

        for (id, full) in ExerciseId::ALL.iter().zip(before) {
            assert_eq!(state.target(*id), (full / 2).max(1));
        }

        assert!(state.activate_recovery(Utc::now()).is_empty());
        assert!(state.profile.recovery_privilege_used);
    }

    #[test]
    fn progress_above_halved_target_is_clamped() {
        let mut state = HabitState::seed(Utc::now());
        state.profile.streak = 5;
        state
            .update_exercise_progress(ExerciseId::Plank, 40, Utc::now())
            .unwrap();

        state.activate_recovery(Utc::now());
        for id in ExerciseId::ALL {
            let progress = state.goals.exercise(id).unwrap().current_progress;
            assert!(progress <= state.target(id));
        }
        let plank = state.goals.exercise(ExerciseId::Plank).unwrap();
        assert_eq!(plank.current_progress, 30);
        assert!(state.exercise_completed(ExerciseId::Plank));
    }

    #[test]
    fn consumed_by_failed_settlement_too() {
        let mut state = HabitState::seed(Utc::now());
        state.profile.streak = 6;
        state.activate_recovery(Utc::now());
        state.settle(Utc::now());
        assert!(!state.profile.recovery_privilege_used);
        assert_eq!(state.profile.streak, 0);
        assert!(!state.can_activate_recovery());
    }
}
