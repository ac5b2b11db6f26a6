//! Directory-backed document store: one `<key>.json` record per document

use super::{page_of, validate_key, DocumentStore, KeyPage};
use crate::canvas::Canvas;
use crate::{Error, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const RECORD_EXT: &str = "json";

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            Error::StoreError(format!("failed to create store at {}: {}", root.display(), e))
        })?;
        debug!("opened canvas store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, RECORD_EXT)))
    }

    fn sorted_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl DocumentStore for DirStore {
    fn size(&self) -> Result<u64> {
        Ok(self.sorted_keys()?.len() as u64)
    }

    fn list(&self, cursor: u64, count: usize) -> Result<KeyPage> {
        Ok(page_of(self.sorted_keys()?, cursor, count))
    }

    fn get(&self, key: &str) -> Result<Canvas> {
        let path = self.record_path(key)?;
        match fs::read(&path) {
            Ok(record) => Canvas::decode(&record),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, doc: &Canvas) -> Result<()> {
        let path = self.record_path(key)?;
        let record = doc.encode()?;

        // Write then rename so readers never see a half-written record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Pattern;
    use crate::geometry::{Point, Rectangle};

    #[test]
    fn documents_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();

        let mut doc = Canvas::new("persisted", 3, 3);
        doc.draw_rect(&Rectangle::new(Point::new(0, 0), 3, 3), Pattern::None, Pattern::Char(b'#'))
            .unwrap();
        store.set("42", &doc).unwrap();

        let reopened = DirStore::open(dir.path()).unwrap();
        let mut loaded = reopened.get("42").unwrap();
        assert_eq!(loaded.split(), vec!["###", "#-#", "###"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("42.json")).unwrap(),
            r#####"{"name":"persisted","width":3,"height":3,"data":"####-####"}"#####
        );
    }

    #[test]
    fn missing_documents_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nope"), Err(Error::NotFound("nope".into())));
        assert_eq!(store.delete("nope"), Err(Error::NotFound("nope".into())));
    }

    #[test]
    fn unsafe_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        let err = store.set("../escape", &Canvas::new("", 1, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn listing_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        for key in ["b", "a", "c"] {
            store.set(key, &Canvas::new("", 1, 1)).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        assert_eq!(store.size().unwrap(), 3);
        let page = store.list(0, 10).unwrap();
        assert_eq!(page.keys, vec!["a", "b", "c"]);
        assert_eq!(page.cursor, 0);

        store.delete("b").unwrap();
        assert_eq!(store.list(0, 10).unwrap().keys, vec!["a", "c"]);
    }
}
