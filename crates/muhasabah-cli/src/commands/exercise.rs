use clap::Subcommand;
use muhasabah_core::ExerciseId;

use crate::session::Session;

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// Set today's progress (clamped to the target)
    Set {
        /// pushups, squats, situps or plank
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Add to today's progress
    Add {
        /// pushups, squats, situps or plank
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
}

pub fn run(action: ExerciseAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    let (id, events) = match action {
        ExerciseAction::Set { id, value } => {
            let id: ExerciseId = id.parse()?;
            (id, session.apply(|e| e.update_exercise_progress(id, value)))
        }
        ExerciseAction::Add { id, delta } => {
            let id: ExerciseId = id.parse()?;
            (id, session.apply(|e| e.increment_exercise(id, delta)))
        }
    };

    session.report(&events, |state| {
        let current = state
            .goals
            .exercise(id)
            .map(|e| e.current_progress)
            .unwrap_or(0);
        format!("{}: {}/{} {}", id.title(), current, state.target(id), id.unit())
    })
}
