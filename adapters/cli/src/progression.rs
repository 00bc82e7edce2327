//! TOML-file-backed progression storage.
//!
//! The store is a flat string-to-string table persisted as a TOML document.
//! Writes land in memory and reach the disk on `flush`. Progression itself
//! is encoded as a TOML value under a single well-known key, so the save
//! file stays readable and hand-editable.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use lastlight_core::{Progression, ProgressionStore};
use thiserror::Error;

const PROGRESSION_KEY: &str = "progression";

/// Failures surfaced by the TOML store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("save file i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The backing file or a stored value is not valid TOML.
    #[error("save data is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value could not be encoded as TOML.
    #[error("save data could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// String-keyed store persisted as one TOML file.
#[derive(Debug)]
pub struct TomlProgressionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl TomlProgressionStore {
    /// Opens the store, reading the backing file when it already exists.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }
}

impl ProgressionStore for TomlProgressionStore {
    type Error = StoreError;

    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let _ = self.entries.insert(key.to_owned(), value);
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let text = toml::to_string(&self.entries)?;
        fs::write(&self.path, text)?;
        self.dirty = false;
        Ok(())
    }
}

/// Reads the persisted progression, defaulting when none was saved yet.
pub fn load_progression<S>(store: &mut S) -> Result<Progression, S::Error>
where
    S: ProgressionStore,
    S::Error: From<toml::de::Error>,
{
    match store.get(PROGRESSION_KEY)? {
        Some(text) => Ok(toml::from_str(&text)?),
        None => Ok(Progression::default()),
    }
}

/// Writes the progression back under its well-known key.
pub fn save_progression<S>(store: &mut S, progression: &Progression) -> Result<(), S::Error>
where
    S: ProgressionStore,
    S::Error: From<toml::ser::Error>,
{
    let text = toml::to_string(progression).map_err(S::Error::from)?;
    store.put(PROGRESSION_KEY, text)?;
    store.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lastlight-{tag}-{}.toml", process::id()))
    }

    #[test]
    fn missing_file_opens_an_empty_store() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);
        let mut store = TomlProgressionStore::open(path).expect("open succeeds");
        assert!(store.get("anything").expect("get succeeds").is_none());
        let progression = load_progression(&mut store).expect("load succeeds");
        assert_eq!(progression, Progression::default());
    }

    #[test]
    fn progression_survives_a_reopen() {
        let path = scratch_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = TomlProgressionStore::open(path.clone()).expect("open succeeds");
        let mut progression = Progression::default();
        progression.salvage = 420;
        progression.best_wave = 13;
        progression.modules.regen = 2;
        save_progression(&mut store, &progression).expect("save succeeds");

        let mut reopened = TomlProgressionStore::open(path.clone()).expect("reopen succeeds");
        let loaded = load_progression(&mut reopened).expect("load succeeds");
        assert_eq!(loaded, progression);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn flush_without_writes_is_a_no_op() {
        let path = scratch_path("untouched");
        let _ = fs::remove_file(&path);
        let mut store = TomlProgressionStore::open(path.clone()).expect("open succeeds");
        store.flush().expect("flush succeeds");
        assert!(!path.exists(), "nothing was written");
    }

    #[test]
    fn corrupt_save_data_surfaces_a_parse_error() {
        let path = scratch_path("corrupt");
        fs::write(&path, "not = [valid").expect("scratch file writes");
        assert!(matches!(
            TomlProgressionStore::open(path.clone()),
            Err(StoreError::Parse(_)),
        ));
        let _ = fs::remove_file(&path);
    }
}
