use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.store.stats(app.today);

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(&stats)?;
            output["file"] = serde_json::json!(app.vocab_path().to_string_lossy());
            output["dataDir"] = serde_json::json!(app.data_dir.to_string_lossy());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Notebook: {}", app.vocab_path().display());
            println!("  Words:      {}", stats.total);
            println!("  Due today:  {}", stats.due);
            println!("  New:        {}", stats.new);
            println!("  Learned:    {}", stats.learned);
            if stats.due > app.config.review.daily_cap {
                println!("  ({} will be drawn for today's review)", app.config.review.daily_cap);
            }
        }
    }

    Ok(())
}
