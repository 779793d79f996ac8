//! Fixed-interval settlement poll.
//!
//! Each tick opens a fresh session, so changes made by other invocations in
//! the meantime are picked up rather than overwritten.

use chrono::Local;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::session::Session;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(json))
}

async fn watch(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(json)?;
    let secs = session.config().watch.poll_interval_secs.max(1);
    report(&session)?;
    drop(session);

    eprintln!("watching for day changes every {secs}s (ctrl-c to stop)");
    let mut interval = tokio::time::interval(Duration::from_secs(secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; the opening session covered it.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match Session::open(json) {
                    Ok(session) => report(&session)?,
                    Err(e) => tracing::warn!(error = %e, "poll failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("watch interrupted");
                break;
            }
        }
    }
    Ok(())
}

fn report(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let events = session.startup_events();
    if events.is_empty() {
        tracing::debug!(at = %Local::now(), "no day change");
        return Ok(());
    }
    session.report(events, |state| {
        format!(
            "{} Day settled. Streak {}, level {}.",
            Local::now().format("%Y-%m-%d %H:%M"),
            state.profile.streak,
            state.profile.level()
        )
    })
}
