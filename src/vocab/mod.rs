//! Vocabulary notebook for Carnet
//!
//! This module provides:
//! - Vocabulary entries and their review schedule fields
//! - Date and interval normalization for hand-edited files
//! - The in-memory store with case-insensitive lookup
//! - CSV persistence with full-file overwrite

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{
    AddedEntry, CsvFile, LoadStatus, VocabPersistence, VocabStorageError, VocabStore,
};
