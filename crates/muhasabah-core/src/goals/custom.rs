//! User-defined tasks.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Reward used when the entry form leaves it blank.
pub const DEFAULT_EXP_REWARD: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Physical,
    Spiritual,
    Intellectual,
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Ok(TaskCategory::Physical),
            "spiritual" => Ok(TaskCategory::Spiritual),
            "intellectual" => Ok(TaskCategory::Intellectual),
            _ => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("'{s}' is not one of physical, spiritual, intellectual"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    Reps,
    Minutes,
    Timer,
    Checkbox,
    Countdown,
}

impl TrackingMode {
    pub fn default_unit(&self) -> &'static str {
        match self {
            TrackingMode::Checkbox => "complete",
            TrackingMode::Minutes | TrackingMode::Timer => "min",
            TrackingMode::Reps | TrackingMode::Countdown => "reps",
        }
    }
}

impl FromStr for TrackingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reps" => Ok(TrackingMode::Reps),
            "minutes" => Ok(TrackingMode::Minutes),
            "timer" => Ok(TrackingMode::Timer),
            "checkbox" => Ok(TrackingMode::Checkbox),
            "countdown" => Ok(TrackingMode::Countdown),
            _ => Err(ValidationError::InvalidValue {
                field: "tracking_mode".into(),
                message: format!("unknown tracking mode '{s}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTask {
    pub id: String,
    pub title: String,
    pub category: TaskCategory,
    pub tracking_mode: TrackingMode,
    pub target: u32,
    pub current: u32,
    pub unit: String,
    pub exp_reward: u64,
    #[serde(default)]
    pub reward_claimed: bool,
}

impl CustomTask {
    pub fn is_completed(&self) -> bool {
        self.current >= self.target
    }
}

/// Raw form input for a new custom task, validated by [`NewCustomTask::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomTask {
    pub title: String,
    pub category: TaskCategory,
    pub tracking_mode: TrackingMode,
    pub target: i64,
    pub current: i64,
    pub unit: Option<String>,
    pub exp_reward: i64,
}

impl NewCustomTask {
    pub fn new(title: impl Into<String>, category: TaskCategory, tracking_mode: TrackingMode) -> Self {
        Self {
            title: title.into(),
            category,
            tracking_mode,
            target: 10,
            current: 0,
            unit: None,
            exp_reward: DEFAULT_EXP_REWARD as i64,
        }
    }

    pub fn with_target(mut self, target: i64) -> Self {
        self.target = target;
        self
    }

    pub fn with_current(mut self, current: i64) -> Self {
        self.current = current;
        self
    }

    pub fn with_exp_reward(mut self, exp_reward: i64) -> Self {
        self.exp_reward = exp_reward;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Validate the form and produce a task with the given id.
    ///
    /// Checkbox tasks always have target 1 and start unticked. A task that
    /// starts at or above its target is already complete and will not pay
    /// out its reward.
    pub fn build(self, id: String) -> Result<CustomTask, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::Empty {
                field: "title".into(),
            });
        }
        if self.exp_reward < 0 {
            return Err(ValidationError::NotPositive {
                field: "exp_reward".into(),
                value: self.exp_reward,
            });
        }

        let (target, current) = if self.tracking_mode == TrackingMode::Checkbox {
            (1, 0)
        } else {
            if self.target <= 0 {
                return Err(ValidationError::NotPositive {
                    field: "target".into(),
                    value: self.target,
                });
            }
            let target = u32::try_from(self.target).unwrap_or(u32::MAX);
            (target, super::clamp_progress(self.current, target))
        };

        let unit = self
            .unit
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.tracking_mode.default_unit().to_string());

        Ok(CustomTask {
            id,
            title,
            category: self.category,
            tracking_mode: self.tracking_mode,
            target,
            current,
            unit,
            exp_reward: self.exp_reward as u64,
            reward_claimed: current >= target,
        })
    }
}
