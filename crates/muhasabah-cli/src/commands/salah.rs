use clap::Subcommand;
use muhasabah_core::SalahId;

use crate::session::Session;

#[derive(Subcommand)]
pub enum SalahAction {
    /// Mark a prayer observed, or unmark it
    Toggle {
        /// fajr, dhuhr, asr, maghrib or isha
        prayer: String,
    },
}

pub fn run(action: SalahAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    match action {
        SalahAction::Toggle { prayer } => {
            let id: SalahId = prayer.parse()?;
            let events = session.apply(|e| e.toggle_salah(id));
            session.report(&events, |state| {
                let done = state
                    .goals
                    .salah
                    .iter()
                    .any(|s| s.id == id && s.completed);
                format!(
                    "{}: {} ({}/5 today)",
                    id.name(),
                    if done { "observed" } else { "not observed" },
                    state.goals.salah_completed()
                )
            })
        }
    }
}
