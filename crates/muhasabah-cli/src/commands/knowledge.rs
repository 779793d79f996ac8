use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand)]
pub enum KnowledgeAction {
    /// Set minutes spent on a quest today
    Set {
        /// quran, tafsir or book
        id: String,
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// List today's quests
    List,
}

pub fn run(action: KnowledgeAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    match action {
        KnowledgeAction::Set { id, minutes } => {
            if session.state().goals.knowledge_quest(&id).is_none() {
                return Err(format!("unknown knowledge quest: {id}").into());
            }
            let events = session.apply(|e| e.update_knowledge(&id, minutes));
            session.report(&events, |state| match state.goals.knowledge_quest(&id) {
                Some(q) => format!("{}: {}/{} min", q.title, q.current_minutes, q.target_minutes),
                None => String::new(),
            })
        }
        KnowledgeAction::List => {
            let quests = &session.state().goals.knowledge;
            if session.json() {
                println!("{}", serde_json::to_string_pretty(quests)?);
            } else {
                for q in quests {
                    println!(
                        "{:<8} {:<22} {:>3}/{:<3} min  {}",
                        q.id,
                        q.title,
                        q.current_minutes,
                        q.target_minutes,
                        if q.is_completed() { "done" } else { "" }
                    );
                }
            }
            Ok(())
        }
    }
}
