use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, render_schedule, Color};
use crate::OutputFormat;

/// Every entry as JSON, with its identifier
fn entries_json(app: &App) -> serde_json::Result<Vec<serde_json::Value>> {
    app.store
        .iter()
        .map(|(id, entry)| {
            let mut value = serde_json::to_value(entry)?;
            value["id"] = serde_json::json!(id);
            Ok(value)
        })
        .collect()
}

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries_json(app)?)?);
        }
        OutputFormat::Plain => {
            if app.store.is_empty() {
                println!(
                    "Your notebook is empty. \
                     Add words with `carnet-cli add` or `carnet-cli lookup --add`."
                );
                return Ok(());
            }

            let word_width = app
                .store
                .iter()
                .map(|(_, e)| e.word.chars().count())
                .max()
                .unwrap_or(4)
                .clamp(4, 24);
            let meaning_width = 30;

            println!(
                "{:<ww$} {:<mw$} {}",
                "Word",
                "Meaning",
                "Schedule",
                ww = word_width,
                mw = meaning_width
            );
            println!(
                "{} {} {}",
                "\u{2500}".repeat(word_width),
                "\u{2500}".repeat(meaning_width),
                "\u{2500}".repeat(30)
            );

            for (_, entry) in app.store.iter() {
                let meaning = if entry.meaning.chars().count() > meaning_width {
                    let cut: String = entry.meaning.chars().take(meaning_width - 3).collect();
                    format!("{}...", cut)
                } else {
                    entry.meaning.clone()
                };

                let word = format!("{:<ww$}", entry.word, ww = word_width);
                let word = if entry.is_due(app.today) {
                    paint(&word, Color::BOLD, use_color)
                } else {
                    word
                };

                println!(
                    "{} {:<mw$} {}",
                    word,
                    meaning,
                    render_schedule(entry),
                    mw = meaning_width
                );
            }

            println!("\n{} words total", app.store.len());
        }
    }

    Ok(())
}
