//! Storage operations for the vocabulary notebook
//!
//! The notebook is a single UTF-8 CSV file:
//! ```text
//! word,meaning,gender,example,last_review,next_review,interval
//! chat,cat,m.,,2024-01-01,2024-01-02,1
//! ```
//! Saving always rewrites the whole file. A file that exists but cannot be
//! read loads as an empty notebook and is reported as
//! [`LoadStatus::Unreadable`], so callers can copy it aside before the first
//! save replaces it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::models::*;

#[derive(Error, Debug)]
pub enum VocabStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
}

pub type Result<T> = std::result::Result<T, VocabStorageError>;

/// Where the notebook rows live between sessions
pub trait VocabPersistence {
    fn load_rows(&self) -> Result<Vec<VocabRow>>;
    fn save_rows(&self, rows: &[VocabRow]) -> Result<()>;
}

/// Notebook kept in a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy the file aside as `<name>.bak`, or `<name>.bak.N` when that is
    /// taken, and return the copy's path
    pub fn back_up(&self) -> Result<PathBuf> {
        let mut n = 0;
        let backup = loop {
            let mut name = self.path.as_os_str().to_owned();
            name.push(".bak");
            if n > 0 {
                name.push(format!(".{}", n));
            }
            let candidate = PathBuf::from(name);
            if !candidate.exists() {
                break candidate;
            }
            n += 1;
        };

        fs::copy(&self.path, &backup)?;
        log::info!("Copied {} to {}", self.path.display(), backup.display());
        Ok(backup)
    }
}

impl VocabPersistence for CsvFile {
    fn load_rows(&self) -> Result<Vec<VocabRow>> {
        let file = fs::File::open(&self.path)?;
        read_rows(file)
    }

    fn save_rows(&self, rows: &[VocabRow]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut buffer = Vec::new();
        write_rows(&mut buffer, rows)?;
        fs::write(&self.path, buffer)?;
        Ok(())
    }
}

/// Read notebook rows from CSV.
///
/// Columns are matched by header name, ignoring ASCII case, so their order
/// is free and any of them except `word` may be missing. A missing column
/// reads as empty.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<VocabRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let word_col = column("word").ok_or(VocabStorageError::MissingColumn("word"))?;
    let meaning_col = column("meaning");
    let gender_col = column("gender");
    let example_col = column("example");
    let last_review_col = column("last_review");
    let next_review_col = column("next_review");
    let interval_col = column("interval");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let field = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        rows.push(VocabRow {
            word: field(Some(word_col)),
            meaning: field(meaning_col),
            gender: field(gender_col),
            example: field(example_col),
            last_review: field(last_review_col),
            next_review: field(next_review_col),
            interval: field(interval_col),
        });
    }

    Ok(rows)
}

/// Write notebook rows as CSV with the full column set
pub fn write_rows<W: io::Write>(writer: W, rows: &[VocabRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record([
            &row.word,
            &row.meaning,
            &row.gender,
            &row.example,
            &row.last_review,
            &row.next_review,
            &row.interval,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Outcome of adding an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedEntry {
    pub id: EntryId,
    /// An entry with the same spelling already existed
    pub duplicate: bool,
}

/// What [`VocabStore::load`] found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No file yet
    Missing,
    /// The file exists but could not be read. Saving over it would drop
    /// every row it holds.
    Unreadable,
}

/// In-memory notebook, owned by the caller for the length of a sitting
#[derive(Debug, Clone, Default)]
pub struct VocabStore {
    entries: Vec<VocabEntry>,
}

impl VocabStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    /// Build a store from raw rows, normalizing schedule fields
    pub fn from_rows(rows: Vec<VocabRow>, today: NaiveDate) -> Self {
        let entries = rows.into_iter().map(|row| row.into_entry(today)).collect();
        Self { entries }
    }

    /// Load the notebook. Any failure yields an empty store; the status
    /// tells a missing file apart from one that could not be read.
    pub fn load(persistence: &impl VocabPersistence, today: NaiveDate) -> (Self, LoadStatus) {
        match persistence.load_rows() {
            Ok(rows) => {
                let store = Self::from_rows(rows, today);
                log::info!("Loaded {} vocabulary entries", store.len());
                (store, LoadStatus::Loaded)
            }
            Err(VocabStorageError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No vocabulary file yet, starting empty");
                (Self::new(), LoadStatus::Missing)
            }
            Err(e) => {
                log::warn!("Failed to load vocabulary, starting empty: {}", e);
                (Self::new(), LoadStatus::Unreadable)
            }
        }
    }

    /// Persist the whole notebook, replacing what was stored
    pub fn save(&self, persistence: &impl VocabPersistence) -> Result<()> {
        persistence.save_rows(&self.rows())?;
        log::info!("Saved {} vocabulary entries", self.len());
        Ok(())
    }

    /// Serialize the whole notebook to CSV text
    pub fn export(&self) -> Result<String> {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &self.rows())?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn rows(&self) -> Vec<VocabRow> {
        self.entries.iter().map(VocabRow::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &VocabEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }

    pub fn get(&self, id: EntryId) -> Option<&VocabEntry> {
        self.entries.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut VocabEntry> {
        self.entries.get_mut(id.0)
    }

    /// First entry spelled like `word`, ignoring case and surrounding spaces
    pub fn find_by_spelling(&self, word: &str) -> Option<(EntryId, &VocabEntry)> {
        let word = word.trim();
        self.iter().find(|(_, entry)| entry.is_spelled(word))
    }

    /// Append an entry. Duplicate spellings are allowed.
    pub fn insert(&mut self, entry: VocabEntry) -> EntryId {
        self.entries.push(entry);
        EntryId(self.entries.len() - 1)
    }

    /// Add a new word, due today
    pub fn add_entry(
        &mut self,
        word: &str,
        meaning: &str,
        gender: &str,
        example: &str,
        today: NaiveDate,
    ) -> AddedEntry {
        let word = word.trim();
        let duplicate = self.find_by_spelling(word).is_some();
        if duplicate {
            log::warn!("'{}' is already in the notebook, adding another sense", word);
        }

        let entry = VocabEntry::new(
            word.to_string(),
            meaning.trim().to_string(),
            gender.trim().to_string(),
            example.trim().to_string(),
            today,
        );
        let id = self.insert(entry);
        log::debug!("Added '{}' as {}", word, id);

        AddedEntry { id, duplicate }
    }

    /// Counts for the statistics screen
    pub fn stats(&self, today: NaiveDate) -> VocabStats {
        let mut stats = VocabStats {
            total: self.entries.len(),
            ..Default::default()
        };

        for entry in &self.entries {
            if entry.is_due(today) {
                stats.due += 1;
            }
            if entry.is_new() {
                stats.new += 1;
            } else {
                stats.learned += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Persistence that always fails to read
    struct Broken;

    impl VocabPersistence for Broken {
        fn load_rows(&self) -> Result<Vec<VocabRow>> {
            Err(VocabStorageError::MissingColumn("word"))
        }

        fn save_rows(&self, _rows: &[VocabRow]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_rows_backfills_schedule_columns() {
        let csv = "word,meaning,gender,example\nchat,cat,m.,Le chat dort.\nmaison,house,f.,\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        let store = VocabStore::from_rows(rows, day(2024, 5, 1));

        assert_eq!(store.len(), 2);
        let (_, chat) = store.find_by_spelling("chat").unwrap();
        assert_eq!(chat.example, "Le chat dort.");
        assert_eq!(chat.interval, 0);
        assert_eq!(chat.last_review, None);
        assert_eq!(chat.next_review, day(2024, 5, 1));
    }

    #[test]
    fn test_read_rows_matches_headers_by_name() {
        let csv = " interval ,next_review,word,meaning\n3,2024-06-01,pain,bread\n";
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].word, "pain");
        assert_eq!(rows[0].meaning, "bread");
        assert_eq!(rows[0].interval, "3");
        assert_eq!(rows[0].gender, "");
    }

    #[test]
    fn test_read_rows_strips_bom() {
        let csv = "\u{feff}word,meaning\nchat,cat\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].word, "chat");
    }

    #[test]
    fn test_read_rows_requires_word_column() {
        let csv = "meaning,gender\ncat,m.\n";
        assert!(matches!(
            read_rows(csv.as_bytes()),
            Err(VocabStorageError::MissingColumn("word"))
        ));
    }

    #[test]
    fn test_read_rows_ignores_header_case() {
        let csv = "Word,Meaning,Next_Review\nchat,cat,2024-06-01\n";
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].word, "chat");
        assert_eq!(rows[0].meaning, "cat");
        assert_eq!(rows[0].next_review, "2024-06-01");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let file = CsvFile::new(temp_dir.path().join("vocab.csv"));

        let (store, status) = VocabStore::load(&file, day(2024, 1, 1));
        assert!(store.is_empty());
        assert_eq!(status, LoadStatus::Missing);
    }

    #[test]
    fn test_load_failure_is_empty() {
        let (store, status) = VocabStore::load(&Broken, day(2024, 1, 1));
        assert!(store.is_empty());
        assert_eq!(status, LoadStatus::Unreadable);
    }

    fn hundred_rows_and_bad_byte() -> Vec<u8> {
        let mut content =
            b"word,meaning,gender,example,last_review,next_review,interval\n".to_vec();
        for i in 0..100 {
            content.extend_from_slice(format!("mot{},word,,,,2024-01-01,0\n", i).as_bytes());
        }
        content.extend_from_slice(b"caf\xe9,coffee,m.,,,2024-01-01,0\n");
        content
    }

    #[test]
    fn test_load_invalid_utf8_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab.csv");
        fs::write(&path, hundred_rows_and_bad_byte()).unwrap();

        let (store, status) = VocabStore::load(&CsvFile::new(path), day(2024, 1, 1));
        assert!(store.is_empty());
        assert_eq!(status, LoadStatus::Unreadable);
    }

    #[test]
    fn test_back_up_keeps_unreadable_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab.csv");
        let original = hundred_rows_and_bad_byte();
        fs::write(&path, &original).unwrap();

        let file = CsvFile::new(path.clone());
        let today = day(2024, 1, 1);
        let (mut store, status) = VocabStore::load(&file, today);
        assert_eq!(status, LoadStatus::Unreadable);

        let backup = file.back_up().unwrap();
        assert_eq!(backup, temp_dir.path().join("vocab.csv.bak"));
        store.add_entry("chat", "cat", "m.", "", today);
        store.save(&file).unwrap();

        assert_eq!(fs::read(&backup).unwrap(), original);
        let (reloaded, _) = VocabStore::load(&file, today);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_back_up_never_replaces_an_earlier_copy() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab.csv");
        let file = CsvFile::new(path.clone());

        fs::write(&path, "first").unwrap();
        let first = file.back_up().unwrap();
        fs::write(&path, "second").unwrap();
        let second = file.back_up().unwrap();

        assert_eq!(second, temp_dir.path().join("vocab.csv.bak.1"));
        assert_eq!(fs::read_to_string(first).unwrap(), "first");
        assert_eq!(fs::read_to_string(second).unwrap(), "second");
    }

    #[test]
    fn test_load_empty_next_review_is_due_today() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab.csv");
        fs::write(
            &path,
            "word,meaning,gender,example,last_review,next_review,interval\nchat,cat,m.,,,,0\n",
        )
        .unwrap();

        let today = day(2024, 2, 2);
        let (store, status) = VocabStore::load(&CsvFile::new(path), today);
        assert_eq!(status, LoadStatus::Loaded);
        let (_, chat) = store.find_by_spelling("chat").unwrap();
        assert_eq!(chat.next_review, today);
        assert!(chat.is_due(today));
    }

    #[test]
    fn test_save_overwrites_with_all_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("vocab.csv");
        let file = CsvFile::new(path.clone());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "word\nstale\nrows\nthat\nshould\ngo\n").unwrap();

        let today = day(2024, 1, 1);
        let mut store = VocabStore::new();
        store.add_entry("chat", "cat", "m.", "", today);
        store.add_entry("école", "school", "f.", "Je vais à l'école.", today);
        store.save(&file).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("word,meaning,gender,example,last_review,next_review,interval")
        );
        assert_eq!(lines.next(), Some("chat,cat,m.,,,2024-01-01,0"));
        assert_eq!(
            lines.next(),
            Some("école,school,f.,Je vais à l'école.,,2024-01-01,0")
        );
        assert_eq!(lines.next(), None);

        let (reloaded, _) = VocabStore::load(&file, day(2030, 1, 1));
        assert_eq!(reloaded.rows(), store.rows());
    }

    #[test]
    fn test_export_quotes_commas() {
        let mut store = VocabStore::new();
        store.add_entry("avoir", "to have, to own", "v.", "", day(2024, 1, 1));

        let exported = store.export().unwrap();
        assert!(exported.contains("\"to have, to own\""));
    }

    #[test]
    fn test_find_by_spelling_ignores_case() {
        let mut store = VocabStore::new();
        store.add_entry("Bonjour", "hello", "interj.", "", day(2024, 1, 1));

        let (id, entry) = store.find_by_spelling("  bONJOUR ").unwrap();
        assert_eq!(id, EntryId(0));
        assert_eq!(entry.meaning, "hello");
        assert!(store.find_by_spelling("bonsoir").is_none());
    }

    #[test]
    fn test_insert_keeps_order_and_allows_duplicates() {
        let today = day(2024, 1, 1);
        let mut store = VocabStore::new();
        let first = store.add_entry("livre", "book", "m.", "", today);
        let second = store.add_entry("LIVRE", "pound", "f.", "", today);

        assert!(!first.duplicate);
        assert!(second.duplicate);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(first.id).unwrap().meaning, "book");
        assert_eq!(store.get(second.id).unwrap().meaning, "pound");
        // lookup returns the earliest sense
        assert_eq!(store.find_by_spelling("livre").unwrap().0, first.id);
    }

    #[test]
    fn test_stats() {
        let today = day(2024, 1, 10);
        let mut store = VocabStore::new();
        store.add_entry("un", "one", "", "", today);
        let later = store.add_entry("deux", "two", "", "", today).id;
        {
            let entry = store.get_mut(later).unwrap();
            entry.interval = 4;
            entry.next_review = day(2024, 1, 14);
        }

        let stats = store.stats(today);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.due, 1);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.learned, 1);
    }
}
