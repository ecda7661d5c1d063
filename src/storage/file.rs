use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::error::StorageError;
use super::CartStorage;

/// Stores each key as a JSON file inside a directory.
///
/// Writes land in a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous cart intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File for `key`: the key's bytes hex-encoded, so distinct keys never
    /// share a file whatever characters they contain.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key.bytes().map(|b| format!("{:02x}", b)).collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cart-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_keys_differing_only_in_punctuation_stay_separate() {
        let dir = scratch_dir("distinct");
        let storage = FileStorage::open(&dir).unwrap();

        storage.save("@a:cart", "[1]").unwrap();
        storage.save("_a_cart", "[2]").unwrap();

        assert_eq!(storage.load("@a:cart").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.load("_a_cart").unwrap().as_deref(), Some("[2]"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = scratch_dir("missing");
        let storage = FileStorage::open(&dir).unwrap();

        assert_eq!(storage.load("@shop:cart").unwrap(), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_overwrites_and_survives_reopen() {
        let dir = scratch_dir("overwrite");
        let storage = FileStorage::open(&dir).unwrap();

        storage.save("@shop:cart", "[1]").unwrap();
        storage.save("@shop:cart", "[2]").unwrap();

        let reopened = FileStorage::open(&dir).unwrap();
        assert_eq!(reopened.load("@shop:cart").unwrap().as_deref(), Some("[2]"));
        assert!(dir.join("4073686f703a63617274.json").exists());
        assert!(!dir.join("4073686f703a63617274.json.tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
