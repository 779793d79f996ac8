use muhasabah_core::WeeklyReport;

use crate::session::Session;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(json)?;
    let history = &session.state().profile.weekly_history;
    let report = WeeklyReport::from_history(history);

    if session.json() {
        let value = serde_json::json!({ "report": report, "history": history });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No settled days yet.");
        return Ok(());
    }
    println!(
        "Last {} days: average {}% ({})",
        report.days, report.average_score, report.sync_rank
    );
    println!(
        "Completions: physical {}, spiritual {}, intellectual {}",
        report.total_physical, report.total_spiritual, report.total_intellectual
    );
    for record in history.iter().rev() {
        let bar = "#".repeat(usize::from(record.score / 5));
        println!(
            "{}  {:>3}%  {bar}",
            record.date.format("%Y-%m-%d"),
            record.score
        );
    }
    Ok(())
}
