use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use carnet_lib::config::Config;
use carnet_lib::lookup::{self, Dictionary, Glossary, LookupOutcome, NoDictionary, Silent, Speech};
use carnet_lib::review::{GradedEntry, Recall, Scheduler, SessionStorage};
use carnet_lib::vocab::{AddedEntry, CsvFile, LoadStatus, VocabStore};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: Config,
    pub today: NaiveDate,
    pub store: VocabStore,
    pub scheduler: Scheduler,
    vocab_file: CsvFile,
    vocab_status: LoadStatus,
    session_storage: SessionStorage,
    dictionary: Box<dyn Dictionary>,
    speech: Box<dyn Speech>,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Config::default_data_dir().context("Failed to get data directory")?,
        };

        let config = Config::load(&data_dir)
            .with_context(|| format!("Failed to read configuration in {}", data_dir.display()))?;
        let today = Local::now().date_naive();

        let vocab_file = CsvFile::new(config.vocab_path(&data_dir));
        let (store, vocab_status) = VocabStore::load(&vocab_file, today);
        if vocab_status == LoadStatus::Unreadable {
            eprintln!(
                "Warning: could not read {}; it will be copied aside before anything is saved",
                vocab_file.path().display()
            );
        }

        // A broken session file only costs today's queue order
        let session_storage = SessionStorage::new(config.session_path(&data_dir));
        let session = session_storage.load(today).unwrap_or_else(|e| {
            log::warn!("Ignoring stored review session: {}", e);
            None
        });
        let scheduler = Scheduler::with_session(config.review, session);

        let dictionary: Box<dyn Dictionary> = match config.glossary_path(&data_dir) {
            Some(path) => match Glossary::open(&path) {
                Ok(glossary) => Box::new(glossary),
                Err(e) => {
                    log::warn!("Glossary {} unavailable: {}", path.display(), e);
                    Box::new(NoDictionary)
                }
            },
            None => Box::new(NoDictionary),
        };

        Ok(Self {
            data_dir,
            config,
            today,
            store,
            scheduler,
            vocab_file,
            vocab_status,
            session_storage,
            dictionary,
            speech: Box::new(Silent),
        })
    }

    /// Path of the vocabulary file
    pub fn vocab_path(&self) -> &std::path::Path {
        self.vocab_file.path()
    }

    /// Write the whole notebook back to disk. A file that could not be read
    /// at startup is copied aside first.
    pub fn save_vocab(&mut self) -> Result<()> {
        if self.vocab_status == LoadStatus::Unreadable {
            let backup = self
                .vocab_file
                .back_up()
                .with_context(|| format!("Failed to back up {}", self.vocab_path().display()))?;
            eprintln!("Kept the unreadable notebook as {}", backup.display());
            self.vocab_status = LoadStatus::Loaded;
        }

        self.store
            .save(&self.vocab_file)
            .with_context(|| format!("Failed to save {}", self.vocab_file.path().display()))
    }

    /// Write the current review session back to disk
    pub fn save_session(&self) -> Result<()> {
        if let Some(session) = self.scheduler.session() {
            self.session_storage
                .save(session)
                .context("Failed to save review session")?;
        }
        Ok(())
    }

    /// Look a word up in the notebook, then the dictionary
    pub fn look_up(&self, word: &str) -> LookupOutcome {
        lookup::look_up(&self.store, self.dictionary.as_ref(), self.speech.as_ref(), word)
    }

    /// Add a word and save the notebook
    pub fn add_entry(
        &mut self,
        word: &str,
        meaning: &str,
        gender: &str,
        example: &str,
    ) -> Result<AddedEntry> {
        let added = self.store.add_entry(word, meaning, gender, example, self.today);
        self.save_vocab()?;
        Ok(added)
    }

    /// Enter review mode, drawing today's queue if there is none yet
    pub fn start_review(&mut self) -> Result<()> {
        self.scheduler.start_or_resume(&self.store, self.today);
        self.save_session()
    }

    /// Grade the revealed word and save both files
    pub fn grade(&mut self, recall: Recall) -> Result<GradedEntry> {
        let graded = self
            .scheduler
            .grade_current(&mut self.store, recall, self.today)?;
        self.save_vocab()?;
        self.save_session()?;
        Ok(graded)
    }

    /// Drop today's session from memory and disk
    pub fn restart_review(&mut self) -> Result<()> {
        self.scheduler.reset();
        self.session_storage
            .clear()
            .context("Failed to remove review session")
    }

    /// Leave review mode without grading the active word
    pub fn leave_review(&mut self) -> Result<()> {
        self.scheduler.leave();
        self.save_session()
    }
}
