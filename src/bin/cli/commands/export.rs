use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, output: Option<&Path>) -> Result<()> {
    let csv = app.store.export().context("Failed to serialize notebook")?;

    match output {
        Some(path) => {
            fs::write(path, csv.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} words to {}", app.store.len(), path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}
