//! Key/value persistence — one JSON document per string key.
//!
//! The store maps string keys to JSON files under a single data directory
//! (a key `k` lives at `<root>/k.json`), the disk analog of the browser
//! storage the journal format comes from.
//! Writes are atomic (temp file + rename); reads that hit missing or corrupt
//! documents fall back to a caller-supplied default instead of failing, so
//! damaged local state degrades to an empty journal rather than a crash.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A directory of JSON documents, one per key.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (or create) the store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        tracing::info!(dir = %root.display(), "store ready");
        Ok(Self { root })
    }

    /// Serialize `value` and write it under `key`, replacing any prior value.
    ///
    /// The document is written to a temp file and renamed into place so a
    /// crash mid-write never leaves a half-written value behind.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let temp = path.with_extension("tmp");
        let content = serde_json::to_string_pretty(value)?;
        let mut f = File::create(&temp)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &path)?;
        Ok(())
    }

    /// Read and deserialize the value under `key`.
    ///
    /// A missing document yields `default` silently; an unreadable or
    /// unparseable one yields `default` with a logged warning. Corrupt local
    /// state is never surfaced to callers.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, using default");
                return default;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is corrupt, using default");
                default
            }
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a key to a safe file stem. The keys this crate uses are already safe;
/// anything outside `[A-Za-z0-9._-]` becomes `_` so a hostile key cannot
/// escape the store directory.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
