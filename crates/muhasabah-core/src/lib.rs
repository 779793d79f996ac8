//! # Muhasabah Core Library
//!
//! Core logic of a gamified daily self-accountability tracker: exercises,
//! the five daily prayers, knowledge study and user-defined tasks feed a
//! single experience ledger, and each new calendar day settles the previous
//! one into streaks, bonuses and carried-over penalty debt.
//!
//! The library is CLI-first: the `muhasabah` binary is a thin layer over the
//! same types.
//!
//! ## Architecture
//!
//! - **Progression**: level/experience ledger with a 1.2x growing threshold
//! - **Goals**: exercise, salah, knowledge and custom task trackers
//! - **Settlement**: day-change detection and the end-of-day algorithm
//! - **Engine**: atomic whole-state transitions plus persistence hook
//! - **Storage**: SQLite key-value records and TOML configuration
//!
//! ## Key Components
//!
//! - [`Engine`]: owns the state and applies operations
//! - [`HabitState`]: profile plus today's goals
//! - [`StateStore`]: versioned persistence with default-fill on load
//! - [`Config`]: front-end preferences

pub mod engine;
pub mod error;
pub mod events;
pub mod goals;
pub mod profile;
pub mod progression;
pub mod recovery;
pub mod settlement;
pub mod signals;
pub mod state;
pub mod stats;
pub mod storage;

pub use engine::{Engine, StateSink};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::{Event, GoalKind};
pub use goals::{
    CustomTask, DailyGoals, Exercise, ExerciseId, KnowledgeQuest, NewCustomTask, Salah, SalahId,
    TaskCategory, TrackingMode,
};
pub use profile::{PenaltyDebt, Profile, Reflection, Theme};
pub use progression::{Ledger, Rank};
pub use settlement::{is_new_day, DailyRecord};
pub use signals::{dispatch, Cue, Notifier, Severity, Silent, SoundPlayer};
pub use state::HabitState;
pub use stats::{sync_rate, SyncRank, WeeklyReport};
pub use storage::{Config, Database, LoadReport, StateStore};
