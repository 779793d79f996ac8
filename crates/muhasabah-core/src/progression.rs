//! Experience ledger and rank ladder.
//!
//! The ledger tracks `level`, `exp` and the threshold for the next level.
//! Awards carry overflow into level-ups; each level-up multiplies the
//! threshold by 1.2 (floored).

use serde::{Deserialize, Serialize};

/// Experience required to leave level 1.
pub const INITIAL_NEXT_LEVEL_EXP: u64 = 100;

/// Threshold for the level after one with threshold `current`.
///
/// Integer form of `floor(current * 1.2)`, which is `current + current / 5`.
/// Saturates at `u64::MAX` and never drops below 1.
pub fn next_threshold(current: u64) -> u64 {
    current.saturating_add(current / 5).max(1)
}

/// Level, experience and next-level threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub level: u32,
    pub exp: u64,
    pub next_level_exp: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            next_level_exp: INITIAL_NEXT_LEVEL_EXP,
        }
    }
}

impl Ledger {
    /// Add `amount` experience and resolve every level crossed.
    ///
    /// Returns the new level numbers in the order they were reached; empty
    /// when no level-up occurred.
    pub fn award(&mut self, amount: u64) -> Vec<u32> {
        self.exp = self.exp.saturating_add(amount);
        let mut reached = Vec::new();
        while self.exp >= self.next_level_exp {
            self.exp -= self.next_level_exp;
            self.level = self.level.saturating_add(1);
            self.next_level_exp = next_threshold(self.next_level_exp);
            reached.push(self.level);
        }
        reached
    }

    /// Repair a ledger read from storage so the invariants hold again.
    ///
    /// Thresholds only grow from [`INITIAL_NEXT_LEVEL_EXP`], so a smaller one
    /// is reset. With the threshold growing geometrically the carry below
    /// takes a few hundred steps at most, even for `exp` near `u64::MAX`.
    ///
    /// Returns the levels reached while carrying dangling overflow.
    pub fn normalize(&mut self) -> Vec<u32> {
        if self.level == 0 {
            self.level = 1;
        }
        if self.next_level_exp < INITIAL_NEXT_LEVEL_EXP {
            tracing::debug!(
                next_level_exp = self.next_level_exp,
                "threshold below initial value, resetting"
            );
            self.next_level_exp = INITIAL_NEXT_LEVEL_EXP;
        }
        self.award(0)
    }

    /// Fraction of the way to the next level, 0.0 .. 1.0.
    pub fn progress(&self) -> f64 {
        self.exp as f64 / self.next_level_exp as f64
    }

    pub fn rank(&self) -> Rank {
        Rank::for_level(self.level)
    }
}

/// Hunter-style rank ladder derived from level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
    #[serde(rename = "NAT")]
    National,
}

impl Rank {
    pub const LADDER: [Rank; 7] = [
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::National,
    ];

    /// Lowest level holding this rank.
    pub fn min_level(&self) -> u32 {
        match self {
            Rank::E => 1,
            Rank::D => 6,
            Rank::C => 11,
            Rank::B => 16,
            Rank::A => 21,
            Rank::S => 26,
            Rank::National => 31,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rank::E => "Insignificant",
            Rank::D => "Awakened",
            Rank::C => "Veteran",
            Rank::B => "Elite",
            Rank::A => "Master",
            Rank::S => "Transcendent",
            Rank::National => "National",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::National => "NAT",
        }
    }

    pub fn for_level(level: u32) -> Rank {
        Self::LADDER
            .iter()
            .rev()
            .copied()
            .find(|rank| level >= rank.min_level())
            .unwrap_or(Rank::E)
    }

    /// The next rank up, or `None` at the top of the ladder.
    pub fn next(&self) -> Option<Rank> {
        let idx = Self::LADDER.iter().position(|r| r == self)?;
        Self::LADDER.get(idx + 1).copied()
    }

    /// Levels left until the next rank; 0 at the top of the ladder.
    pub fn levels_to_next(level: u32) -> u32 {
        Rank::for_level(level)
            .next()
            .map(|next| next.min_level().saturating_sub(level))
            .unwrap_or(0)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
