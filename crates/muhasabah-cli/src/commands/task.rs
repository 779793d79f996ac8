//! Custom task commands for CLI.

use clap::Subcommand;
use muhasabah_core::{CustomTask, NewCustomTask, TaskCategory, TrackingMode};

use crate::session::Session;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a custom task
    Add {
        /// Task title
        title: String,
        /// physical, spiritual or intellectual
        #[arg(long, default_value = "physical")]
        category: String,
        /// reps, minutes, timer, checkbox or countdown
        #[arg(long, default_value = "reps")]
        mode: String,
        /// Daily target (ignored for checkbox tasks)
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        target: i64,
        /// Starting progress
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        current: i64,
        /// Display unit (defaults by mode)
        #[arg(long)]
        unit: Option<String>,
        /// Experience paid on completion
        #[arg(long, default_value = "5", allow_negative_numbers = true)]
        exp: i64,
    },
    /// Set a task's progress (clamped to its target)
    Set {
        /// Task ID
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Add to a task's progress
    Progress {
        /// Task ID
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
    /// List tasks
    List,
}

fn line(task: &CustomTask) -> String {
    format!(
        "{}  {:<24} {:?}/{:?}  {}/{} {}{}",
        task.id,
        task.title,
        task.category,
        task.tracking_mode,
        task.current,
        task.target,
        task.unit,
        if task.is_completed() { "  done" } else { "" }
    )
}

fn require_task(session: &Session, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match session.state().profile.custom_task(id) {
        Some(_) => Ok(()),
        None => Err(format!("unknown task: {id}").into()),
    }
}

pub fn run(action: TaskAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(json)?;

    match action {
        TaskAction::Add {
            title,
            category,
            mode,
            target,
            current,
            unit,
            exp,
        } => {
            let category: TaskCategory = category.parse()?;
            let mode: TrackingMode = mode.parse()?;
            let mut form = NewCustomTask::new(title, category, mode)
                .with_target(target)
                .with_current(current)
                .with_exp_reward(exp);
            if let Some(unit) = unit {
                form = form.with_unit(unit);
            }
            // Validate here so the user sees why nothing was created.
            if let Err(e) = form.clone().build(String::new()) {
                return session.skip(&format!("task not created: {e}"));
            }

            let events = session.apply(|e| e.add_custom_task(form));
            session.report(&events, |state| match state.profile.custom_tasks.last() {
                Some(task) => format!("Task created: {}", line(task)),
                None => String::new(),
            })
        }
        TaskAction::Set { id, value } => {
            require_task(&session, &id)?;
            let events = session.apply(|e| e.update_custom_task(&id, value));
            session.report(&events, |state| {
                state.profile.custom_task(&id).map(line).unwrap_or_default()
            })
        }
        TaskAction::Progress { id, delta } => {
            require_task(&session, &id)?;
            let events = session.apply(|e| e.increment_custom_task(&id, delta));
            session.report(&events, |state| {
                state.profile.custom_task(&id).map(line).unwrap_or_default()
            })
        }
        TaskAction::Remove { id } => {
            require_task(&session, &id)?;
            let events = session.apply(|e| e.remove_custom_task(&id));
            session.report(&events, |_| format!("Task removed: {id}"))
        }
        TaskAction::List => {
            let tasks = &session.state().profile.custom_tasks;
            if session.json() {
                println!("{}", serde_json::to_string_pretty(tasks)?);
            } else if tasks.is_empty() {
                println!("No custom tasks.");
            } else {
                for task in tasks {
                    println!("{}", line(task));
                }
            }
            Ok(())
        }
    }
}
