//! File-backed note collection.
//!
//! The whole collection lives in one JSON array on disk. Every operation reads
//! the full file and every mutation rewrites it. There is no locking: two
//! requests that load and save concurrently race, and the last writer wins.

use notes_types::{Note, note_id};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid note data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Handle for `path`, creating an empty collection there if none exists.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(path);
        store.init()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty collection if the backing file is absent.
    pub fn init(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        self.save(&[])?;
        log::info!("Created empty note collection at {}", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> StoreResult<Vec<Note>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        serde_json::from_str(&raw).map_err(|e| self.parse_err(e))
    }

    /// Replaces the collection on disk via a sibling temp file and a rename.
    ///
    /// Each save gets its own temp file, so concurrent saves never interleave
    /// bytes: the file on disk is always one complete write.
    pub fn save(&self, notes: &[Note]) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(notes).map_err(|e| self.parse_err(e))?;
        let mut tmp = NamedTempFile::new_in(self.dir()).map_err(|e| self.io_err(e))?;
        tmp.write_all(&data).map_err(|e| self.io_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<Note>> {
        let notes = self.load()?;
        Ok(find_by_id(&notes, id).cloned())
    }

    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.load()?.len())
    }

    /// Adds `note` to the end of the collection. Duplicate ids are not checked.
    pub fn append(&self, note: Note) -> StoreResult<Note> {
        let mut notes = self.load()?;
        notes.push(note.clone());
        self.save(&notes)?;
        Ok(note)
    }

    /// Overwrites the first matching note's fields with those in `patch`.
    ///
    /// Fields absent from `patch` are kept. Returns `None` when no note has `id`.
    pub fn merge_by_id(&self, id: &str, patch: Note) -> StoreResult<Option<Note>> {
        let mut notes = self.load()?;
        let Some(note) = notes.iter_mut().find(|n| note_id(n) == Some(id)) else {
            return Ok(None);
        };
        note.extend(patch);
        let merged = note.clone();
        self.save(&notes)?;
        Ok(Some(merged))
    }

    /// Removes every note with `id`. Succeeds whether or not anything matched.
    pub fn delete_by_id(&self, id: &str) -> StoreResult<String> {
        let mut notes = self.load()?;
        let before = notes.len();
        notes.retain(|n| note_id(n) != Some(id));
        self.save(&notes)?;
        log::debug!("Deleted {} note(s) with id {}", before - notes.len(), id);
        Ok(id.to_string())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parse_err(&self, source: serde_json::Error) -> StoreError {
        StoreError::Parse {
            path: self.path.clone(),
            source,
        }
    }
}

/// First note in `notes` whose `id` equals `id`.
pub fn find_by_id<'a>(notes: &'a [Note], id: &str) -> Option<&'a Note> {
    notes.iter().find(|n| note_id(n) == Some(id))
}
