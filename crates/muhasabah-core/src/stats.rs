//! Display-only statistics: the live sync rate and the weekly report.
//!
//! Nothing here feeds back into settlement. The sync rate blends all four
//! categories while settlement gates on exercises alone.

use serde::{Deserialize, Serialize};

use crate::settlement::DailyRecord;
use crate::state::HabitState;

/// Study minutes that fill the study share of the sync rate.
pub const SYNC_STUDY_MINUTES: u32 = 120;

/// Weighted completion for the current day, 0.0 ..= 100.0.
///
/// Prayers 40%, knowledge 20%, exercises 30%, study 10%.
pub fn sync_rate(state: &HabitState) -> f64 {
    let goals = &state.goals;

    let salah = if goals.salah.is_empty() {
        0.0
    } else {
        goals.salah_completed() as f64 / goals.salah.len() as f64
    };
    let knowledge = goals.knowledge.iter().map(|k| k.fraction()).sum::<f64>()
        / goals.knowledge.len().max(1) as f64;
    let physical = state.exercises_completed() as f64 / goals.exercises.len().max(1) as f64;
    let study = (goals.study_minutes as f64 / SYNC_STUDY_MINUTES as f64).min(1.0);

    salah * 40.0 + knowledge * 20.0 + physical * 30.0 + study * 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncRank {
    #[serde(rename = "S-RANK")]
    S,
    #[serde(rename = "A-RANK")]
    A,
    #[serde(rename = "B-RANK")]
    B,
    #[serde(rename = "C-RANK")]
    C,
    #[serde(rename = "D-RANK")]
    D,
    #[serde(rename = "E-RANK")]
    E,
}

impl SyncRank {
    pub fn for_score(score: u32) -> SyncRank {
        match score {
            90.. => SyncRank::S,
            80..=89 => SyncRank::A,
            70..=79 => SyncRank::B,
            60..=69 => SyncRank::C,
            40..=59 => SyncRank::D,
            _ => SyncRank::E,
        }
    }
}

impl std::fmt::Display for SyncRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SyncRank::S => "S-RANK",
            SyncRank::A => "A-RANK",
            SyncRank::B => "B-RANK",
            SyncRank::C => "C-RANK",
            SyncRank::D => "D-RANK",
            SyncRank::E => "E-RANK",
        };
        f.write_str(s)
    }
}

/// Summary over the weekly history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub days: usize,
    pub average_score: u32,
    pub sync_rank: SyncRank,
    pub total_physical: u32,
    pub total_spiritual: u32,
    pub total_intellectual: u32,
    /// Oldest first, ready for a left-to-right chart.
    pub scores: Vec<u8>,
}

impl WeeklyReport {
    pub fn from_history(history: &[DailyRecord]) -> Self {
        let days = history.len();
        let sum: u32 = history.iter().map(|r| u32::from(r.score)).sum();
        let average_score = if days == 0 {
            0
        } else {
            (2 * sum + days as u32) / (2 * days as u32)
        };

        Self {
            days,
            average_score,
            sync_rank: SyncRank::for_score(average_score),
            total_physical: history.iter().map(|r| r.physical_completions).sum(),
            total_spiritual: history.iter().map(|r| r.spiritual_completions).sum(),
            total_intellectual: history.iter().map(|r| r.intellectual_completions).sum(),
            scores: history.iter().rev().map(|r| r.score).collect(),
        }
    }
}
