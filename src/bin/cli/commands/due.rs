use anyhow::Result;

use carnet_lib::review::format_interval;

use crate::app::App;
use crate::render::terminal::{paint, progress_bar, Color};
use crate::OutputFormat;

/// Show today's queue. Before review mode has been entered this is only a
/// preview: nothing is drawn for keeps and nothing is written.
pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.scheduler.preview(&app.store, app.today);
    let started = app.scheduler.session().is_some();
    let queue: Vec<_> = session.remaining_in(&app.store).collect();
    let (done, total) = session.progress();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "date": session.date().format("%Y-%m-%d").to_string(),
                "started": started,
                "state": session.state(),
                "reviewed": done,
                "total": total,
                "queue": queue.iter().map(|(id, entry)| serde_json::json!({
                    "id": id,
                    "word": entry.word,
                    "interval": entry.interval,
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Review for {}  {}",
                session.date().format("%Y-%m-%d"),
                progress_bar(done, total, 20)
            );

            if queue.is_empty() {
                println!("Nothing left to review today.");
                return Ok(());
            }
            if !started {
                println!("Not started yet; `carnet-cli review` shuffles these again.");
            }

            let word_width = queue
                .iter()
                .map(|(_, e)| e.word.chars().count())
                .max()
                .unwrap_or(4)
                .clamp(4, 30);
            for (i, (_, entry)) in queue.iter().enumerate() {
                let marker = if started && i == 0 {
                    paint(">", Color::YELLOW, use_color)
                } else {
                    " ".to_string()
                };
                println!(
                    "{} {:<ww$} {}",
                    marker,
                    entry.word,
                    format_interval(entry.interval),
                    ww = word_width
                );
            }
            println!("\n{} words left", queue.len());
        }
    }

    Ok(())
}
