use anyhow::{bail, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    word: &str,
    meaning: &str,
    gender: &str,
    example: &str,
    format: &OutputFormat,
) -> Result<()> {
    if word.trim().is_empty() {
        bail!("The word cannot be empty");
    }

    let added = app.add_entry(word, meaning, gender, example)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": added.id,
                "word": word.trim(),
                "duplicate": added.duplicate,
                "nextReview": app.today.format("%Y-%m-%d").to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if added.duplicate {
                println!(
                    "Note: '{}' was already in your notebook; added another sense.",
                    word.trim()
                );
            }
            println!("Added '{}' ({}), due today.", word.trim(), added.id);
        }
    }

    Ok(())
}
