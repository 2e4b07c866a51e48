use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Storage medium holding the serialized history under a single key.
pub trait HistoryBackend: Send {
    /// Raw stored bytes, or `None` when nothing has been saved yet.
    fn load(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the stored bytes. Must be all-or-nothing.
    fn save(&self, bytes: &[u8]) -> io::Result<()>;
}

/// History kept in one JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryBackend for FileBackend {
    fn load(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Readers only ever see the old file or the complete new one.
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)
    }
}

/// In-process storage. Clones share the same slot, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        if let Ok(mut slot) = backend.slot.lock() {
            *slot = Some(bytes.into());
        }
        backend
    }

    #[cfg(test)]
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Make every following `save` fail as if the medium were full.
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self) -> io::Result<Option<Vec<u8>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("memory backend lock poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::StorageFull,
                "storage quota exceeded",
            ));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("memory backend lock poisoned"))?;
        *slot = Some(bytes.to_vec());
        Ok(())
    }
}
