use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glanz_core::store::{KeyValueSlot, StoreError};

/// One `<key>.json` file per key inside a directory
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the old value
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glanz_core::store::WordStore;

    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        assert!(slot.read("words").unwrap().is_none());
    }

    #[test]
    fn write_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested")).unwrap();

        slot.write("words", "[1,2,3]").unwrap();
        slot.write("words", "[]").unwrap();

        assert_eq!(slot.read("words").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("nested/words.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_opens_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("words.json"), "garbage").unwrap();

        let slot = Arc::new(FileSlot::new(dir.path()).unwrap());
        let store = WordStore::open(slot, "words");
        assert!(store.is_empty());
    }
}
