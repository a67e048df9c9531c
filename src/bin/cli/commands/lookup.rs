use anyhow::{bail, Result};

use carnet_lib::lookup::{LookupOutcome, Suggestion};

use crate::app::App;
use crate::render::terminal::{paint, render_answer, Color};
use crate::OutputFormat;

/// Values typed by the user, taking precedence over the glossary
pub struct Overrides {
    pub meaning: Option<String>,
    pub gender: Option<String>,
    pub example: Option<String>,
}

impl Overrides {
    fn apply(self, suggestion: Option<Suggestion>) -> Suggestion {
        let base = suggestion.unwrap_or_default();
        Suggestion {
            meaning: self.meaning.unwrap_or(base.meaning),
            part_of_speech: self.gender.unwrap_or(base.part_of_speech),
            example: self.example.unwrap_or(base.example),
        }
    }
}

pub fn run(
    app: &mut App,
    word: &str,
    add: bool,
    overrides: Overrides,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let outcome = app.look_up(word);

    if let OutputFormat::Json = format {
        let mut output = serde_json::to_value(&outcome)?;
        output["audio"] = serde_json::json!(outcome.audio().is_some());
        println!("{}", serde_json::to_string_pretty(&output)?);
        if !add {
            return Ok(());
        }
    }

    let (word, suggestion) = match outcome {
        LookupOutcome::Empty => bail!("Nothing to look up"),
        LookupOutcome::Known { entry, .. } => {
            if let OutputFormat::Plain = format {
                println!("{}", paint("Already in your notebook:", Color::GREEN, use_color));
                println!("{}", render_answer(&entry, use_color));
            }
            return Ok(());
        }
        LookupOutcome::Resolved { word, suggestion, .. } => (word, Some(suggestion)),
        LookupOutcome::Unresolved { word, .. } => (word, None),
    };

    if let OutputFormat::Plain = format {
        match &suggestion {
            Some(s) => {
                println!(
                    "    {}  {}",
                    paint(&word, Color::BOLD, use_color),
                    paint(s.part_of_speech_or_unknown(), Color::ITALIC, use_color)
                );
                println!("    {}", paint(&s.meaning, Color::CYAN, use_color));
                if !s.example.is_empty() {
                    println!("    {}", paint(&s.example, Color::DIM, use_color));
                }
            }
            None => println!("No dictionary entry for '{}'. Check the spelling.", word),
        }
    }

    if !add {
        return Ok(());
    }

    let filled = overrides.apply(suggestion);
    if filled.is_empty() {
        bail!("No meaning for '{}'; pass one with --meaning", word);
    }

    let added = app.add_entry(&word, &filled.meaning, &filled.part_of_speech, &filled.example)?;
    if let OutputFormat::Plain = format {
        println!("Added '{}' ({}), due today.", word, added.id);
    }

    Ok(())
}
