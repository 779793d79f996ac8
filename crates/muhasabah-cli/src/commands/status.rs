use muhasabah_core::goals::STUDY_THRESHOLD_MINUTES;
use muhasabah_core::{sync_rate, ExerciseId, HabitState, Rank};

use crate::session::Session;

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render(state: &HabitState) -> String {
    let profile = &state.profile;
    let ledger = &profile.ledger;
    let rank = ledger.rank();
    let mut out = Vec::new();

    out.push(format!("{} ({})", profile.name, profile.title));
    out.push(format!(
        "Level {}  {}-Rank {}  exp {}/{}  streak {}",
        ledger.level,
        rank.code(),
        rank.label(),
        ledger.exp,
        ledger.next_level_exp,
        profile.streak
    ));
    if let Some(next) = rank.next() {
        out.push(format!(
            "{} level(s) to {}-Rank",
            Rank::levels_to_next(ledger.level),
            next.code()
        ));
    }

    out.push(String::new());
    out.push("Exercises".to_string());
    for id in ExerciseId::ALL {
        let current = state
            .goals
            .exercise(id)
            .map(|e| e.current_progress)
            .unwrap_or(0);
        let debt = profile.penalty_debt.get(id);
        let debt = if debt > 0 {
            format!("  (+{debt} debt)")
        } else {
            String::new()
        };
        out.push(format!(
            "  {} {:<9} {:>4}/{:<4} {}{debt}",
            check(state.exercise_completed(id)),
            id.as_str(),
            current,
            state.target(id),
            id.unit()
        ));
    }

    out.push("Salah".to_string());
    let prayers: Vec<String> = state
        .goals
        .salah
        .iter()
        .map(|s| format!("{} {}", check(s.completed), s.id.name()))
        .collect();
    out.push(format!("  {}", prayers.join("  ")));

    out.push("Knowledge".to_string());
    for q in &state.goals.knowledge {
        out.push(format!(
            "  {} {:<22} {:>3}/{} min",
            check(q.is_completed()),
            q.title,
            q.current_minutes,
            q.target_minutes
        ));
    }
    out.push(format!(
        "  {} Study {} min (goal {STUDY_THRESHOLD_MINUTES})",
        check(state.goals.study_goal_met()),
        state.goals.study_minutes
    ));

    if !profile.custom_tasks.is_empty() {
        out.push("Custom tasks".to_string());
        for task in &profile.custom_tasks {
            out.push(format!(
                "  {} {:<22} {}/{} {}",
                check(task.is_completed()),
                task.title,
                task.current,
                task.target,
                task.unit
            ));
        }
    }

    out.push(String::new());
    let recovery = if profile.recovery_privilege_used {
        "active"
    } else if state.can_activate_recovery() {
        "available"
    } else {
        "locked"
    };
    out.push(format!(
        "Sync rate {:.1}%  recovery {recovery}  theme {}",
        sync_rate(state),
        profile.theme
    ));
    out.join("\n")
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(json)?;
    let state = session.state();

    if session.json() {
        let targets: serde_json::Map<String, serde_json::Value> = ExerciseId::ALL
            .iter()
            .map(|id| (id.as_str().to_string(), state.target(*id).into()))
            .collect();
        let value = serde_json::json!({
            "profile": state.profile,
            "goals": state.goals,
            "targets": targets,
            "rank": state.profile.ledger.rank(),
            "sync_rate": sync_rate(state),
            "recovery_available": state.can_activate_recovery(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render(state));
    }
    Ok(())
}
