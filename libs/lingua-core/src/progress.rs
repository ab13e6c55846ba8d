//! Durable discovery and mastery records.
//!
//! The store owns one [`ProgressRecord`] per vocabulary key (created lazily
//! on first reference, never deleted) plus the process-wide
//! [`Preferences`], and persists both to a single JSON file. Load and save
//! failures degrade instead of propagating: a missing or corrupt file
//! yields an empty store, a failed write leaves the in-memory state
//! authoritative until the next mutation retries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::types::{
    AttemptOutcome, Preferences, ProgressCounts, ProgressRecord, BIOME_KEY_PREFIX,
    MASTERY_THRESHOLD,
};

/// On-disk document: progress records keyed by vocabulary key, plus
/// preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SaveFile {
    #[serde(default)]
    progress: HashMap<String, ProgressRecord>,
    #[serde(default)]
    preferences: Preferences,
}

/// Owner of all progress records and preferences.
pub struct ProgressStore {
    path: PathBuf,
    records: HashMap<String, ProgressRecord>,
    preferences: Preferences,
}

impl ProgressStore {
    /// Load the store from `path`, creating the file if it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is logged and
    /// treated as empty; individual records with missing fields keep their
    /// field defaults.
    pub fn load_or_create(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match read_save_file(&path) {
            Ok(Some(file)) => {
                tracing::info!(
                    records = file.progress.len(),
                    path = %path.display(),
                    "loaded progress file"
                );
                Self {
                    path,
                    records: file.progress,
                    preferences: file.preferences,
                }
            }
            Ok(None) => {
                let store = Self {
                    path,
                    records: HashMap::new(),
                    preferences: Preferences::default(),
                };
                store.save();
                store
            }
            Err(err) => {
                tracing::error!("{err}; starting with empty progress");
                Self {
                    path,
                    records: HashMap::new(),
                    preferences: Preferences::default(),
                }
            }
        }
    }

    /// Mark a key discovered. Idempotent: returns true only when this call
    /// made the discovery, and a repeat call leaves the original
    /// `discovered_time` untouched.
    pub fn record_discovery(&mut self, key: &str, now_ms: i64) -> bool {
        let record = self.records.entry(key.to_string()).or_default();
        if record.discovered {
            return false;
        }
        record.discovered = true;
        record.discovered_time = now_ms;
        tracing::info!(key, "marked as discovered");
        self.save();
        true
    }

    /// Record a judged quiz attempt for a known key.
    ///
    /// Returns `None` (and changes nothing) for keys without a record.
    /// Crossing the mastery threshold flips `mastered` exactly once; the
    /// returned outcome reports that transition so the caller can notify.
    /// Also stamps the last-answer preference, so one save covers both.
    pub fn record_attempt(
        &mut self,
        key: &str,
        correct: bool,
        now_ms: i64,
    ) -> Option<AttemptOutcome> {
        let record = self.records.get_mut(key)?;
        record.attempt_count += 1;
        record.last_attempt_time = now_ms;

        let mut newly_mastered = false;
        if correct {
            record.correct_count += 1;
            if record.correct_count >= MASTERY_THRESHOLD && !record.mastered {
                record.mastered = true;
                newly_mastered = true;
                tracing::info!(key, "item mastered");
            }
        }

        self.preferences.last_flashcard_answer_time = now_ms;
        self.save();
        Some(AttemptOutcome {
            correct,
            newly_mastered,
        })
    }

    /// Stamp the last-answer time without touching any record (retry
    /// submissions are judged but not counted).
    pub fn note_answered(&mut self, now_ms: i64) {
        self.preferences.last_flashcard_answer_time = now_ms;
        self.save();
    }

    pub fn is_discovered(&self, key: &str) -> bool {
        self.records.get(key).is_some_and(|r| r.discovered)
    }

    pub fn is_mastered(&self, key: &str) -> bool {
        self.records.get(key).is_some_and(|r| r.mastered)
    }

    pub fn record(&self, key: &str) -> Option<&ProgressRecord> {
        self.records.get(key)
    }

    /// Keys eligible for a random quiz: discovered but not yet mastered.
    pub fn unmastered_discovered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .records
            .iter()
            .filter(|(_, r)| r.discovered && !r.mastered)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Aggregate projections over all tracked records.
    pub fn counts(&self) -> ProgressCounts {
        let mut counts = ProgressCounts {
            total: self.records.len(),
            ..ProgressCounts::default()
        };
        for (key, record) in &self.records {
            if record.discovered {
                counts.discovered += 1;
                if key.starts_with(BIOME_KEY_PREFIX) {
                    counts.discovered_biomes += 1;
                }
            }
            if record.mastered {
                counts.mastered += 1;
            }
        }
        counts
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_welcome_message_enabled(&mut self, enabled: bool) {
        self.preferences.welcome_message_enabled = enabled;
        self.save();
    }

    pub fn set_flashcard_interval(&mut self, interval_ms: i64) {
        self.preferences.flashcard_interval = interval_ms;
        self.save();
    }

    /// Write the current state out, logging (not propagating) failures.
    fn save(&self) {
        if let Err(err) = self.try_save() {
            tracing::error!("{err}; keeping progress in memory");
        }
    }

    fn try_save(&self) -> Result<()> {
        let file = SaveFile {
            progress: self.records.clone(),
            preferences: self.preferences.clone(),
        };
        // Matches the established file format: pretty-printed JSON.
        let json = serde_json::to_string_pretty(&file)
            .map_err(|source| StoreError::Encode { source })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read and parse the save file. `Ok(None)` means the file does not exist.
fn read_save_file(path: &Path) -> Result<Option<SaveFile>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let file = serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(file))
}
