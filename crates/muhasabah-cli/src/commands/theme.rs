use clap::Subcommand;
use muhasabah_core::Theme;

use crate::session::Session;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Switch theme
    Set {
        /// emerald, blue, red, gold or violet
        name: String,
    },
    /// List available themes
    List,
}

pub fn run(action: ThemeAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ThemeAction::Set { name } => {
            let theme: Theme = name.parse()?;
            let mut session = Session::open(json)?;
            let events = session.apply(|e| e.set_theme(theme));
            session.report(&events, |state| {
                format!(
                    "Theme: {} ({})",
                    state.profile.theme,
                    state.profile.theme.label()
                )
            })
        }
        ThemeAction::List => {
            let session = Session::open(json)?;
            let current = session.state().profile.theme;
            if session.json() {
                println!("{}", serde_json::to_string_pretty(&Theme::ALL)?);
            } else {
                for theme in Theme::ALL {
                    let marker = if theme == current { "*" } else { " " };
                    println!("{marker} {:<8} {}", theme.as_str(), theme.label());
                }
            }
            Ok(())
        }
    }
}
