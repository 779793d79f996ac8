use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand)]
pub enum SoundAction {
    /// Turn sound cues on or off
    Toggle,
}

pub fn run(action: SoundAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    match action {
        SoundAction::Toggle => {
            let events = session.apply(|e| e.toggle_sound());
            session.report(&events, |state| {
                format!(
                    "Sound: {}",
                    if state.profile.sound_enabled { "on" } else { "off" }
                )
            })
        }
    }
}
