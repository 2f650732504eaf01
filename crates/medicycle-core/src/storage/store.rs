//! JSON document store.
//!
//! Two independent keyed records on disk:
//! - `medicycle.json` -- the full [`Document`], loaded on every read and
//!   replaced wholesale on every write (last writer wins, single-threaded
//!   access assumed)
//! - `verified_profile` -- a raw profile id string marking the profile that
//!   has passed the passkey check this session
//!
//! A missing or corrupt document degrades to the empty default; it never
//! surfaces as an error.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use super::data_dir;
use crate::error::{ImportError, StoreError};
use crate::model::Document;

const DOCUMENT_FILE: &str = "medicycle.json";
const VERIFIED_FILE: &str = "verified_profile";

/// Handle to the on-disk records. Cheap to clone; holds no document state.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open the store in an explicit directory (tests use a tempdir).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn document_path(&self) -> PathBuf {
        self.dir.join(DOCUMENT_FILE)
    }

    fn verified_path(&self) -> PathBuf {
        self.dir.join(VERIFIED_FILE)
    }

    /// Load the document; missing or corrupt data falls back to default.
    pub fn load(&self) -> Document {
        match fs::read_to_string(self.document_path()) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Document::default(),
        }
    }

    /// Replace the persisted document wholesale.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(self.document_path(), json).map_err(|source| StoreError::WriteFailed {
            path: self.document_path(),
            source,
        })
    }

    // ── Verified-profile marker ──────────────────────────────────────

    pub fn verified_profile(&self) -> Option<String> {
        let id = fs::read_to_string(self.verified_path()).ok()?;
        let id = id.trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    pub fn set_verified_profile(&self, profile_id: &str) -> Result<(), StoreError> {
        fs::write(self.verified_path(), profile_id).map_err(|source| StoreError::WriteFailed {
            path: self.verified_path(),
            source,
        })
    }

    pub fn clear_verified_profile(&self) {
        // Already-absent marker is fine.
        let _ = fs::remove_file(self.verified_path());
    }

    // ── Export / import ──────────────────────────────────────────────

    /// Full document as pretty-printed JSON for user download.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.load())?)
    }

    /// Validate and wholesale-replace the persisted document, then clear
    /// the verified marker. A rejected payload leaves both untouched.
    pub fn import_json(&self, raw: &str) -> Result<Document, ImportError> {
        let value: Value = serde_json::from_str(raw).map_err(ImportError::Parse)?;
        if !has_profiles(&value) {
            return Err(ImportError::MissingProfiles);
        }
        let doc: Document = serde_json::from_value(value).map_err(ImportError::Parse)?;
        self.save(&doc)?;
        self.clear_verified_profile();
        Ok(doc)
    }
}

/// The original import check was JS truthiness on the `profiles` field, so
/// `null`, `false`, `0` and `""` are rejected the same as a missing key.
fn has_profiles(value: &Value) -> bool {
    match value.get("profiles") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Profile;
    use tempfile::TempDir;

    fn store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::at(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_document_loads_default() {
        let (_dir, store) = store();
        let doc = store.load();
        assert!(doc.profiles.is_empty());
        assert!(doc.current_profile_id.is_none());
    }

    #[test]
    fn corrupt_document_loads_default() {
        let (dir, store) = store();
        fs::write(dir.path().join(DOCUMENT_FILE), "{not json").unwrap();
        assert!(store.load().profiles.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let mut doc = Document::default();
        let profile = Profile::new("Ann", "40", "pk");
        let id = profile.id.clone();
        doc.profiles.push(profile);
        doc.current_profile_id = Some(id.clone());

        store.save(&doc).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.profiles.len(), 1);
        assert_eq!(loaded.current_profile_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn verified_marker_set_get_clear() {
        let (_dir, store) = store();
        assert!(store.verified_profile().is_none());

        store.set_verified_profile("profile_1").unwrap();
        assert_eq!(store.verified_profile().as_deref(), Some("profile_1"));

        // Single slot: a second set overwrites.
        store.set_verified_profile("profile_2").unwrap();
        assert_eq!(store.verified_profile().as_deref(), Some("profile_2"));

        store.clear_verified_profile();
        assert!(store.verified_profile().is_none());
        // Clearing twice is harmless.
        store.clear_verified_profile();
    }

    #[test]
    fn import_without_profiles_changes_nothing() {
        let (_dir, store) = store();
        let mut doc = Document::default();
        doc.profiles.push(Profile::new("Ann", "40", "pk"));
        store.save(&doc).unwrap();
        store.set_verified_profile(&doc.profiles[0].id).unwrap();

        for payload in [
            "{}",
            r#"{"profiles": null}"#,
            r#"{"profiles": false}"#,
            r#"{"profiles": 0}"#,
            r#"{"profiles": ""}"#,
        ] {
            let err = store.import_json(payload).unwrap_err();
            assert!(matches!(err, ImportError::MissingProfiles), "{}", payload);
        }
        // Not JSON at all.
        assert!(matches!(
            store.import_json("not json"),
            Err(ImportError::Parse(_))
        ));

        // Document and verification untouched.
        assert_eq!(store.load().profiles.len(), 1);
        assert!(store.verified_profile().is_some());
    }

    #[test]
    fn import_replaces_document_and_clears_verification() {
        let (_dir, store) = store();
        let mut doc = Document::default();
        doc.profiles.push(Profile::new("Old", "50", "pk"));
        store.save(&doc).unwrap();
        store.set_verified_profile(&doc.profiles[0].id).unwrap();

        let payload = r#"{
            "profiles": [
                {"id": "profile_a", "name": "New", "age": "30", "passkey": "s", "medicines": []}
            ],
            "history": [],
            "currentProfileId": null
        }"#;
        let imported = store.import_json(payload).unwrap();
        assert_eq!(imported.profiles[0].name, "New");

        let loaded = store.load();
        assert_eq!(loaded.profiles.len(), 1);
        assert_eq!(loaded.profiles[0].id, "profile_a");
        assert!(store.verified_profile().is_none());
    }

    #[test]
    fn import_accepts_empty_profile_list() {
        // [] is truthy in the original check.
        let (_dir, store) = store();
        let imported = store.import_json(r#"{"profiles": []}"#).unwrap();
        assert!(imported.profiles.is_empty());
    }

    #[test]
    fn export_is_pretty_printed() {
        let (_dir, store) = store();
        let mut doc = Document::default();
        doc.profiles.push(Profile::new("Ann", "40", "pk"));
        store.save(&doc).unwrap();

        let out = store.export_json().unwrap();
        assert!(out.contains('\n'));
        let value: Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("profiles").unwrap().is_array());
    }
}
