use clap::Subcommand;
use muhasabah_core::goals::STUDY_THRESHOLD_MINUTES;

use crate::session::Session;

#[derive(Subcommand)]
pub enum StudyAction {
    /// Log study minutes (one experience per five minutes)
    Add {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
}

pub fn run(action: StudyAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    match action {
        StudyAction::Add { minutes } => {
            let events = session.apply(|e| e.add_study_minutes(minutes));
            session.report(&events, |state| {
                format!(
                    "Study: {} min today (goal {STUDY_THRESHOLD_MINUTES})",
                    state.goals.study_minutes
                )
            })
        }
    }
}
