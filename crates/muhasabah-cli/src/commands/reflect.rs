use crate::session::Session;

pub fn run(note: &str, category: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;
    if note.trim().is_empty() {
        return session.skip("reflection note is empty");
    }
    let events = session.apply(|e| e.add_reflection(note, category));
    session.report(&events, |state| {
        format!("Reflection recorded ({} total)", state.profile.reflections.len())
    })
}
