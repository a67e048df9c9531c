mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "carnet-cli", about = "Vocabulary notebook with daily spaced repetition", version)]
struct Cli {
    /// Use a specific data directory (default: ~/.local/share/carnet)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Look a word up in the notebook, then in the glossary
    Lookup {
        /// Word to look up
        word: String,
        /// Add the word when it is not in the notebook yet
        #[arg(long)]
        add: bool,
        /// Meaning to store instead of the glossary's
        #[arg(long)]
        meaning: Option<String>,
        /// Gender or part of speech to store instead of the glossary's
        #[arg(long)]
        gender: Option<String>,
        /// Example sentence to store instead of the glossary's
        #[arg(long)]
        example: Option<String>,
    },

    /// Add a word to the notebook
    Add {
        /// Word to add
        word: String,
        /// Translated meaning
        #[arg(long)]
        meaning: String,
        /// Gender or part of speech
        #[arg(long, default_value = "")]
        gender: String,
        /// Example sentence
        #[arg(long, default_value = "")]
        example: String,
    },

    /// Review today's words
    Review {
        /// Discard today's session and draw a fresh queue
        #[arg(long)]
        restart: bool,
    },

    /// Show today's review queue without grading. Before `review` has run
    /// today this is a preview and nothing is saved.
    Due,

    /// List every word with its schedule
    List,

    /// Show notebook statistics
    Stats,

    /// Write the notebook as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Lookup { word, add, meaning, gender, example } => {
            let overrides = commands::lookup::Overrides { meaning, gender, example };
            commands::lookup::run(&mut app, &word, add, overrides, &cli.format, use_color)?;
        }
        Command::Add { word, meaning, gender, example } => {
            commands::add::run(&mut app, &word, &meaning, &gender, &example, &cli.format)?;
        }
        Command::Review { restart } => {
            if restart {
                app.restart_review()?;
            }
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::review::run(&mut app, &mut stdin.lock(), &mut stdout.lock(), use_color)?;
        }
        Command::Due => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Command::List => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Export { output } => {
            commands::export::run(&app, output.as_deref())?;
        }
    }

    Ok(())
}
