use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single user-trained correction pair.
///
/// `incorrect` holds the phrase as the recognizer transcribed it, normalized
/// for matching (lowercased, punctuation stripped, trimmed). `correct` is
/// kept exactly as the user typed it so intended capitalization and
/// punctuation survive into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Normalized mishearing to search for.
    pub incorrect: String,
    /// Replacement text, verbatim.
    pub correct: String,
}

/// Errors surfaced by the dictionary store.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// `remove_sample` was called with an index past the end of the list.
    /// Signaled explicitly so the training UI never silently drops the wrong
    /// entry.
    #[error("sample index {index} out of range ({len} entries)")]
    IndexOutOfRange {
        /// Index the caller asked for.
        index: usize,
        /// Number of entries currently stored.
        len: usize,
    },
}

/// Persistent store for user-trained correction pairs.
///
/// Entries live in memory as an ordered list and are mirrored to a single
/// JSON file after every mutation. Persistence failures never poison the
/// in-memory state: a missing or corrupt file loads as empty (first-run
/// behavior), and a failed save is logged while the mutation stands for the
/// rest of the process.
///
/// The store does not reject duplicate entries; with longest-first matching
/// in the correction engine a duplicate is a harmless no-op, and duplicate
/// detection belongs to the training UI.
pub struct DictionaryStore {
    path: Option<PathBuf>,
    entries: Vec<DictionaryEntry>,
}

impl DictionaryStore {
    /// Opens a store backed by the JSON file at `path`, loading any existing
    /// entries. A missing or unreadable file yields an empty store.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path).unwrap_or_default();
        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            "dictionary store opened"
        );
        Self {
            path: Some(path),
            entries,
        }
    }

    /// Creates a store with no persistence backing. Mutations only affect
    /// the in-memory list; used for tests and ephemeral pipelines.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    /// Reloads entries from the backing file, replacing the in-memory list.
    /// Missing or corrupt data resets the list to empty.
    pub fn load(&mut self) {
        if let Some(path) = &self.path {
            self.entries = read_entries(path).unwrap_or_default();
        }
    }

    /// Writes the current entries to the backing file.
    ///
    /// Save failures are logged and otherwise ignored: the in-memory list
    /// remains authoritative for the rest of the process.
    pub fn save(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = write_entries(&self.entries, path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save dictionary");
        }
    }

    /// Adds a training pair and persists.
    ///
    /// Only `incorrect` is normalized; `correct` is stored exactly as given.
    pub fn add_sample(&mut self, incorrect: &str, correct: &str) {
        let normalized = normalize(incorrect);
        tracing::debug!(incorrect = %normalized, correct = %correct, "adding dictionary sample");
        self.entries.push(DictionaryEntry {
            incorrect: normalized,
            correct: correct.to_owned(),
        });
        self.save();
    }

    /// Removes the entry at `index` and persists.
    ///
    /// # Errors
    /// Returns [`DictionaryError::IndexOutOfRange`] if `index` is past the
    /// end of the list; the caller must not treat that as a no-op.
    pub fn remove_sample(&mut self, index: usize) -> Result<DictionaryEntry, DictionaryError> {
        if index >= self.entries.len() {
            return Err(DictionaryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.save();
        Ok(removed)
    }

    /// Removes every entry and persists.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.save();
    }

    /// The current entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalizes a transcribed phrase for matching: lowercase, punctuation
/// removed, surrounding whitespace trimmed. Interior spaces are preserved so
/// multi-word phrases stay multi-word.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    stripped.trim().to_owned()
}

fn read_entries(path: &Path) -> Option<Vec<DictionaryEntry>> {
    // Missing file is the first-run case, not an error.
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "dictionary file is corrupt, starting empty"
            );
            None
        }
    }
}

fn write_entries(entries: &[DictionaryEntry], path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&parent).context("failed to create dictionary directory")?;

    // Write-then-rename so a crash mid-save never truncates the dictionary.
    let json = serde_json::to_vec_pretty(entries).context("failed to serialize dictionary")?;
    let mut tmp = tempfile::NamedTempFile::new_in(&parent)
        .context("failed to create temporary dictionary file")?;
    tmp.write_all(&json)
        .context("failed to write dictionary contents")?;
    tmp.persist(path)
        .context("failed to replace dictionary file")?;
    Ok(())
}
