//! Daily settlement.
//!
//! Runs once per calendar-day boundary: snapshots the day into the weekly
//! history, advances or breaks the streak, converts unmet exercise targets
//! into penalty debt, purges completed custom tasks and resets the daily
//! goal collections.
//!
//! Only the four standard exercises decide success. Prayers, knowledge and
//! study feed the day's score but never the streak or the debt.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::goals::{DailyGoals, ExerciseId, TaskCategory};
use crate::state::HabitState;

/// Flat experience bonus for a fully successful day.
pub const SETTLEMENT_BONUS_EXP: u64 = 50;

/// Added to every missed exercise's shortfall.
pub const PENALTY_SURCHARGE: u32 = 15;

/// Maximum entries kept in the weekly history.
pub const HISTORY_LEN: usize = 7;

/// Immutable snapshot of one settled day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: DateTime<Utc>,
    pub physical_completions: u32,
    pub spiritual_completions: u32,
    pub intellectual_completions: u32,
    /// 0 ..= 100
    pub score: u8,
}

/// Whether `now` falls on a different calendar day than `last_reset`,
/// both read in `now`'s timezone. Time of day is ignored.
pub fn is_new_day<Tz: TimeZone>(last_reset: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    last_reset.with_timezone(&now.timezone()).date_naive() != now.date_naive()
}

/// Number of standard items the score is measured against: every exercise,
/// prayer and knowledge quest, plus one for the study threshold.
pub fn score_denominator(goals: &DailyGoals) -> u32 {
    (goals.exercises.len() + goals.salah.len() + goals.knowledge.len() + 1) as u32
}

/// `round(100 * done / possible)`, half rounding up.
fn percentage(done: u32, possible: u32) -> u8 {
    if possible == 0 {
        return 0;
    }
    let done = done.min(possible);
    ((200 * done + possible) / (2 * possible)) as u8
}

impl HabitState {
    fn custom_completed(&self, category: TaskCategory) -> u32 {
        self.profile
            .custom_tasks
            .iter()
            .filter(|t| t.category == category && t.is_completed())
            .count() as u32
    }

    /// Snapshot of the day as it stands.
    ///
    /// Custom tasks count toward the category tallies but not the score, so
    /// the score stays comparable regardless of how many tasks a user adds.
    pub fn day_record(&self, date: DateTime<Utc>) -> DailyRecord {
        let exercises = self.exercises_completed() as u32;
        let salah = self.goals.salah_completed() as u32;
        let knowledge = self.goals.knowledge_completed() as u32;
        let study = u32::from(self.goals.study_goal_met());

        let standard_done = exercises + salah + knowledge + study;

        DailyRecord {
            date,
            physical_completions: exercises + self.custom_completed(TaskCategory::Physical),
            spiritual_completions: salah
                + knowledge
                + self.custom_completed(TaskCategory::Spiritual),
            intellectual_completions: study + self.custom_completed(TaskCategory::Intellectual),
            score: percentage(standard_done, score_denominator(&self.goals)),
        }
    }

    /// Settle the day unconditionally.
    pub fn settle(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let record = self.day_record(now);
        let all_done = self.all_exercises_completed();
        let mut events = Vec::new();

        if all_done {
            self.profile.streak += 1;
            self.profile.penalty_debt.clear();
            self.award(SETTLEMENT_BONUS_EXP, now, &mut events);
        } else {
            // Targets must be read before anything below resets them.
            let mut debt = self.profile.penalty_debt;
            for id in ExerciseId::ALL {
                let target = self.target(id);
                let current = self
                    .goals
                    .exercise(id)
                    .map(|e| e.current_progress)
                    .unwrap_or(0);
                let owed = if current >= target {
                    0
                } else {
                    target - current + PENALTY_SURCHARGE
                };
                debt.set(id, owed);
            }
            self.profile.penalty_debt = debt;
            self.profile.streak = 0;
        }

        self.profile.weekly_history.insert(0, record.clone());
        self.profile.weekly_history.truncate(HISTORY_LEN);
        self.profile.recovery_privilege_used = false;
        self.profile.custom_tasks.retain(|t| !t.is_completed());
        self.goals = DailyGoals::seed();
        self.profile.last_reset_date = now;

        tracing::info!(
            all_done,
            streak = self.profile.streak,
            score = record.score,
            "day settled"
        );

        events.insert(
            0,
            Event::DaySettled {
                record,
                all_done,
                streak: self.profile.streak,
                at: now,
            },
        );
        events
    }

    /// Settle only when `now` is on a later calendar day than the last
    /// reset. Safe to call on every poll tick.
    pub fn settle_if_due<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Vec<Event> {
        if !is_new_day(&self.profile.last_reset_date, now) {
            return Vec::new();
        }
        self.settle(now.with_timezone(&Utc))
    }
}
