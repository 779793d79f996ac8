use crate::session::Session;

/// Opening a session already settles a pending day; this only reports it.
pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(json)?;
    let events = session.startup_events().to_vec();
    session.report(&events, |state| {
        if events.is_empty() {
            "No day change since last settlement.".to_string()
        } else {
            format!(
                "Day settled. Streak {}, level {}.",
                state.profile.streak,
                state.profile.level()
            )
        }
    })
}
