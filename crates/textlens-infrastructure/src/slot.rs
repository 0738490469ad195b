//! Durable key-value slots for serialized history.
//!
//! A slot holds one opaque string blob. [`FileHistorySlot`] keeps it in a
//! file and replaces it atomically; [`MemoryHistorySlot`] keeps it in memory
//! for tests and hosts without durable storage.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use textlens_core::{Result, TextLensError};

/// A single durable slot holding the serialized history.
pub trait HistorySlot: Send + Sync {
    /// Reads the slot. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the slot contents with `blob`.
    fn save(&self, blob: &str) -> Result<()>;
}

/// Slot backed by a single file.
///
/// Writes go to a temporary sibling file that is synced and then renamed
/// over the target, so a crash mid-write never leaves a half-written blob.
#[derive(Debug, Clone)]
pub struct FileHistorySlot {
    path: PathBuf,
}

impl FileHistorySlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a temporary file path for atomic writes.
    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| TextLensError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| TextLensError::io("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

impl HistorySlot for FileHistorySlot {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            TextLensError::persistence(format!(
                "Failed to read history file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(blob.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Slot kept in memory.
#[derive(Debug, Default)]
pub struct MemoryHistorySlot {
    blob: Mutex<Option<String>>,
}

impl MemoryHistorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Current contents of the slot.
    pub fn snapshot(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|guard| guard.clone())
    }
}

impl HistorySlot for MemoryHistorySlot {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .blob
            .lock()
            .map_err(|e| TextLensError::persistence(format!("Slot lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        let mut guard = self
            .blob
            .lock()
            .map_err(|e| TextLensError::persistence(format!("Slot lock poisoned: {}", e)))?;
        *guard = Some(blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileHistorySlot::new(temp_dir.path().join("history.json"));
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_file_slot_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileHistorySlot::new(temp_dir.path().join("nested").join("history.json"));

        slot.save("{\"a\":1}").unwrap();
        assert_eq!(slot.load().unwrap().as_deref(), Some("{\"a\":1}"));

        slot.save("{\"a\":2}").unwrap();
        assert_eq!(slot.load().unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(!temp_dir.path().join("nested").join(".history.json.tmp").exists());
    }

    #[test]
    fn test_file_slot_blank_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(FileHistorySlot::new(path).load().unwrap(), None);
    }

    #[test]
    fn test_memory_slot() {
        let slot = MemoryHistorySlot::new();
        assert_eq!(slot.load().unwrap(), None);
        slot.save("blob").unwrap();
        assert_eq!(slot.snapshot().as_deref(), Some("blob"));
    }
}
