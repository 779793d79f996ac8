use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// The five daily prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalahId {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl SalahId {
    pub const ALL: [SalahId; 5] = [
        SalahId::Fajr,
        SalahId::Dhuhr,
        SalahId::Asr,
        SalahId::Maghrib,
        SalahId::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalahId::Fajr => "fajr",
            SalahId::Dhuhr => "dhuhr",
            SalahId::Asr => "asr",
            SalahId::Maghrib => "maghrib",
            SalahId::Isha => "isha",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SalahId::Fajr => "Fajr",
            SalahId::Dhuhr => "Dhuhr",
            SalahId::Asr => "Asr",
            SalahId::Maghrib => "Maghrib",
            SalahId::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for SalahId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalahId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SalahId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::unknown("salah", s))
    }
}

/// A prayer is a plain toggle with no progress scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salah {
    pub id: SalahId,
    #[serde(default)]
    pub completed: bool,
}

impl Salah {
    pub fn seeds() -> Vec<Salah> {
        SalahId::ALL
            .into_iter()
            .map(|id| Salah {
                id,
                completed: false,
            })
            .collect()
    }
}
