//! Country preference store
//!
//! The one durable piece of user state: which country the visitor last
//! selected. Modeled as an explicit context object with load / update /
//! persist operations rather than ambient globals. Backed by a small JSON
//! file written atomically; an in-memory mode exists for tests and
//! one-shot commands.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A selectable country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    /// ISO code, lowercase
    pub code: String,
}

impl Country {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into().to_lowercase(),
        }
    }

    /// The default selection used before anything was ever persisted
    pub fn default_selection() -> Self {
        Self::new("United States", "us")
    }
}

/// File-backed store for the selected country.
///
/// Reads happen once at load; every update persists immediately so the
/// next session starts where this one left off.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    country: Country,
}

impl PreferenceStore {
    /// Load the store, falling back to the default country when the file
    /// is absent or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let country = std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_else(Country::default_selection);

        Self { path, country }
    }

    /// In-memory store (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            country: Country::default_selection(),
        }
    }

    /// The currently selected country
    pub fn country(&self) -> &Country {
        &self.country
    }

    /// Update the selection and persist it
    pub async fn set_country(&mut self, country: Country) -> Result<()> {
        self.country = country;
        self.save().await
    }

    /// Persist the current selection.
    ///
    /// Writes to a temp file first, then renames, so a crash mid-write
    /// never leaves a truncated preference file.
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::preference(format!("Failed to create {}: {e}", parent.display())))?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.country)
            .map_err(|e| Error::preference(format!("Failed to serialize preference: {e}")))?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::preference(format!("Failed to write preference file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::preference(format!("Failed to rename preference file: {e}")))?;

        Ok(())
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

/// Default location of the preference file, relative to the home
/// directory when available
pub fn default_prefs_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .map_or_else(
            || PathBuf::from(".newsgate/country.json"),
            |home| home.join(".newsgate").join("country.json"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_selection() {
        let country = Country::default_selection();
        assert_eq!(country.name, "United States");
        assert_eq!(country.code, "us");
    }

    #[test]
    fn test_code_lowercased() {
        assert_eq!(Country::new("Germany", "DE").code, "de");
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::load(dir.path().join("country.json"));
        assert_eq!(store.country(), &Country::default_selection());
    }

    #[test]
    fn test_load_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("country.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = PreferenceStore::load(&path);
        assert_eq!(store.country(), &Country::default_selection());
    }

    #[tokio::test]
    async fn test_set_country_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("country.json");

        let mut store = PreferenceStore::load(&path);
        store
            .set_country(Country::new("Germany", "de"))
            .await
            .unwrap();

        let reloaded = PreferenceStore::load(&path);
        assert_eq!(reloaded.country(), &Country::new("Germany", "de"));
        // The temp file never survives a successful save
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_in_memory_never_touches_disk() {
        let mut store = PreferenceStore::in_memory();
        store
            .set_country(Country::new("Japan", "jp"))
            .await
            .unwrap();
        assert!(store.is_in_memory());
        assert_eq!(store.country().code, "jp");
    }
}
