// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named save files in one directory.
//!
//! Each save is `<dir>/<name>.json`. Listing strips the extension. New saves are named after
//! the UTC time they were created, `YYYY-MM-DDTHH-MM-SS`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::document::PersistedDocument;
use crate::error::StateError;

/// File extension of save files.
pub const SAVE_EXTENSION: &str = "json";

/// Name of the save written on exit.
pub const AUTOSAVE_NAME: &str = "auto";

/// A directory of save files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Use `dir` for save files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path of the save called `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SAVE_EXTENSION}"))
    }

    /// Names of all saves, sorted. A missing directory has no saves.
    pub fn list_saves(&self) -> Result<Vec<String>, StateError> {
        let mut names: Vec<String> = self
            .save_files()?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Write `document` as the save called `name`, replacing any existing one.
    pub fn save(&self, name: &str, document: &PersistedDocument) -> Result<PathBuf, StateError> {
        let path = self.checked_path(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| StateError::io(&self.dir, e))?;
        let json = document.to_json().map_err(|e| StateError::json(&path, e))?;
        fs::write(&path, json).map_err(|e| StateError::io(&path, e))?;
        log::debug!("wrote save {}", path.display());
        Ok(path)
    }

    /// Read the save called `name`.
    pub fn load(&self, name: &str) -> Result<PersistedDocument, StateError> {
        let path = self.checked_path(name)?;
        let text = fs::read_to_string(&path).map_err(|e| StateError::io(&path, e))?;
        PersistedDocument::from_json(&text).map_err(|e| StateError::json(&path, e))
    }

    /// Read the save called `name`, or an empty document if it is missing or unreadable.
    pub fn load_or_empty(&self, name: &str) -> PersistedDocument {
        match self.load(name) {
            Ok(document) => document,
            Err(err) if err.is_not_found() => PersistedDocument::empty(),
            Err(err) => {
                log::warn!("ignoring save {name:?}: {err}");
                PersistedDocument::empty()
            }
        }
    }

    /// Name of the most recently modified save.
    pub fn latest(&self) -> Result<Option<String>, StateError> {
        let newest = self
            .save_files()?
            .into_iter()
            .max_by(|(a_name, a_time), (b_name, b_time)| {
                a_time.cmp(b_time).then_with(|| a_name.cmp(b_name))
            });
        Ok(newest.map(|(name, _)| name))
    }

    /// Read the most recently modified save. Failures are logged and yield `None`.
    pub fn load_latest(&self) -> Option<(String, PersistedDocument)> {
        let name = match self.latest() {
            Ok(name) => name?,
            Err(err) => {
                log::warn!("cannot list saves: {err}");
                return None;
            }
        };
        match self.load(&name) {
            Ok(document) => Some((name, document)),
            Err(err) => {
                log::warn!("ignoring latest save: {err}");
                None
            }
        }
    }

    /// Write `document` under a new name derived from `unix_secs`. Returns the name.
    pub fn create_new_save(
        &self,
        document: &PersistedDocument,
        unix_secs: u64,
    ) -> Result<String, StateError> {
        let base = timestamp_name(unix_secs);
        let mut name = base.clone();
        let mut suffix = 2;
        while self.path_for(&name).exists() {
            name = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.save(&name, document)?;
        Ok(name)
    }

    /// Write the autosave.
    pub fn autosave(&self, document: &PersistedDocument) -> Result<PathBuf, StateError> {
        self.save(AUTOSAVE_NAME, document)
    }

    fn checked_path(&self, name: &str) -> Result<PathBuf, StateError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            let err = io::Error::new(io::ErrorKind::InvalidInput, "invalid save name");
            return Err(StateError::io(self.dir.join(name), err));
        }
        Ok(self.path_for(name))
    }

    fn save_files(&self) -> Result<Vec<(String, SystemTime)>, StateError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StateError::io(&self.dir, e)),
        };
        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StateError::io(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            out.push((name.to_string(), modified));
        }
        Ok(out)
    }
}

/// Format seconds since the Unix epoch as `YYYY-MM-DDTHH-MM-SS` (UTC).
///
/// ```rust
/// assert_eq!(lazy_state::store::timestamp_name(0), "1970-01-01T00-00-00");
/// assert_eq!(lazy_state::store::timestamp_name(951_782_400), "2000-02-29T00-00-00");
/// ```
pub fn timestamp_name(unix_secs: u64) -> String {
    let second = unix_secs % 60;
    let minute = unix_secs / 60 % 60;
    let hour = unix_secs / 3600 % 24;
    let mut days = unix_secs / 86_400;

    let mut year = 1970;
    loop {
        let in_year = if is_leap_year(year) { 366 } else { 365 };
        if days < in_year {
            break;
        }
        days -= in_year;
        year += 1;
    }
    let february = if is_leap_year(year) { 29 } else { 28 };
    let mut month = 1;
    for len in [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31] {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }
    let day = days + 1;
    format!("{year:04}-{month:02}-{day:02}T{hour:02}-{minute:02}-{second:02}")
}

fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EntryType, NodeEntry};
    use lazy_tree::Fields;

    fn temp_store(name: &str) -> SaveStore {
        let dir = std::env::temp_dir().join(format!("lazy_state_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        SaveStore::new(dir)
    }

    fn doc(path: &str) -> PersistedDocument {
        PersistedDocument {
            root: Some(NodeEntry {
                class_name: "FolderNode".into(),
                path: path.into(),
                entry_type: EntryType::Folder,
                fields: Fields::new(),
                children: Vec::new(),
            }),
        }
    }

    #[test]
    fn missing_directory_lists_nothing_and_loads_empty() {
        let store = temp_store("missing");
        assert!(store.list_saves().unwrap().is_empty());
        assert!(store.load_or_empty("x").is_empty());
        assert!(store.load("x").unwrap_err().is_not_found());
        assert!(store.load_latest().is_none());
    }

    #[test]
    fn save_list_and_load() {
        let store = temp_store("roundtrip");
        store.save("beta", &doc("b")).unwrap();
        store.save("alpha", &doc("a")).unwrap();
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list_saves().unwrap(), vec!["alpha", "beta"]);
        assert_eq!(store.load("alpha").unwrap(), doc("a"));
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn invalid_names_are_rejected() {
        let store = temp_store("invalid");
        assert!(store.save("../escape", &doc("")).is_err());
        assert!(store.save("", &doc("")).is_err());
    }

    #[test]
    fn corrupt_save_is_a_json_error_or_empty() {
        let store = temp_store("corrupt");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path_for("bad"), "[1, 2").unwrap();
        assert!(matches!(store.load("bad"), Err(StateError::Json { .. })));
        assert!(store.load_or_empty("bad").is_empty());
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn new_saves_get_unique_timestamp_names() {
        let store = temp_store("new");
        let first = store.create_new_save(&doc(""), 0).unwrap();
        let second = store.create_new_save(&doc(""), 0).unwrap();
        assert_eq!(first, "1970-01-01T00-00-00");
        assert_eq!(second, "1970-01-01T00-00-00-2");
        store.autosave(&doc("auto")).unwrap();
        assert_eq!(store.list_saves().unwrap().len(), 3);
        let (_, latest) = store.load_latest().unwrap();
        assert!(!latest.is_empty());
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn timestamp_names() {
        assert_eq!(timestamp_name(86_399), "1970-01-01T23-59-59");
        assert_eq!(timestamp_name(1_700_000_000), "2023-11-14T22-13-20");
    }
}
