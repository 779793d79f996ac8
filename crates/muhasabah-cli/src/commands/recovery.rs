use clap::Subcommand;
use muhasabah_core::recovery::RECOVERY_STREAK;

use crate::session::Session;

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Halve today's exercise targets (needs a five-day streak)
    Activate,
    /// Show whether recovery is available
    Status,
}

pub fn run(action: RecoveryAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    match action {
        RecoveryAction::Activate => {
            if !session.state().can_activate_recovery() {
                let profile = &session.state().profile;
                let reason = if profile.recovery_privilege_used {
                    "recovery is already active today".to_string()
                } else {
                    format!(
                        "recovery needs a {RECOVERY_STREAK}-day streak (current: {})",
                        profile.streak
                    )
                };
                return session.skip(&reason);
            }
            let events = session.apply(|e| e.activate_recovery());
            session.report(&events, |_| "Recovery active: exercise targets halved for today.".into())
        }
        RecoveryAction::Status => {
            let state = session.state();
            let status = if state.profile.recovery_privilege_used {
                "active"
            } else if state.can_activate_recovery() {
                "available"
            } else {
                "locked"
            };
            if session.json() {
                let value = serde_json::json!({
                    "status": status,
                    "streak": state.profile.streak,
                    "required_streak": RECOVERY_STREAK,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "Recovery: {status} (streak {}/{RECOVERY_STREAK})",
                    state.profile.streak
                );
            }
            Ok(())
        }
    }
}
