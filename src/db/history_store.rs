use std::collections::HashSet;

use crate::db::backend::HistoryBackend;
use crate::errors::HistoryError;
use crate::models::qr_code::QrRecord;
use crate::utils::id_source::MAX_ID;

/// Newest-first collection of generated QR codes, mirrored to a backend.
///
/// Every mutation writes the whole collection before returning. When that
/// write fails the in-memory collection keeps the change and stays
/// authoritative for the session; the caller gets `HistoryError::Write`.
pub struct HistoryStore {
    backend: Box<dyn HistoryBackend>,
    records: Vec<QrRecord>,
    limit: Option<usize>,
}

impl HistoryStore {
    /// Rebuild the collection from the backend. Missing or unreadable data
    /// yields an empty history instead of an error.
    pub fn load(backend: Box<dyn HistoryBackend>, limit: Option<usize>) -> Self {
        let records = read_records(backend.as_ref());
        Self {
            backend,
            records,
            limit,
        }
    }

    pub fn records(&self) -> &[QrRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: u64) -> Option<&QrRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0)
    }

    /// Check the backend can still be read.
    pub fn is_readable(&self) -> bool {
        self.backend.load().is_ok()
    }

    /// Put `record` at the front. A record whose id is already present is
    /// ignored.
    pub fn append(&mut self, record: QrRecord) -> Result<&[QrRecord], HistoryError> {
        if self.contains(record.id) {
            log::debug!("QR code {} already in history, skipping append", record.id);
            return Ok(&self.records);
        }
        self.records.insert(0, record);
        if let Some(limit) = self.limit {
            self.records.truncate(limit);
        }
        self.persist()?;
        Ok(&self.records)
    }

    /// Remove the record with `id`. Absent ids are not an error.
    pub fn remove_by_id(&mut self, id: u64) -> Result<&[QrRecord], HistoryError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() != before {
            self.persist()?;
        }
        Ok(&self.records)
    }

    /// Remove the record at `index` (0 is the newest).
    pub fn remove_at(&mut self, index: usize) -> Result<&[QrRecord], HistoryError> {
        if index >= self.records.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.records.remove(index);
        self.persist()?;
        Ok(&self.records)
    }

    fn persist(&self) -> Result<(), HistoryError> {
        let bytes = serde_json::to_vec(&self.records)?;
        self.backend.save(&bytes).map_err(|e| {
            log::error!("Failed to persist QR history: {}", e);
            HistoryError::Write(e)
        })
    }
}

fn read_records(backend: &dyn HistoryBackend) -> Vec<QrRecord> {
    let bytes = match backend.load() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Could not read QR history, starting empty: {}", e);
            return Vec::new();
        }
    };

    let records: Vec<QrRecord> = match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Stored QR history is malformed, starting empty: {}", e);
            return Vec::new();
        }
    };

    // Keep the first occurrence of each id so the collection stays unique.
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            if r.id > MAX_ID {
                log::warn!("Dropping stored QR code with out-of-range id {}", r.id);
                return false;
            }
            seen.insert(r.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::{FileBackend, MemoryBackend};
    use crate::models::qr_params::{ImageFormat, QrSize};

    fn record(id: u64) -> QrRecord {
        QrRecord::new(
            id,
            format!("text {id}"),
            format!("https://example.test/qr?data={id}"),
            QrSize::Medium,
            ImageFormat::Png,
        )
    }

    fn store_with(backend: &MemoryBackend) -> HistoryStore {
        HistoryStore::load(Box::new(backend.clone()), None)
    }

    fn ids(records: &[QrRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn absent_storage_loads_empty() {
        let store = store_with(&MemoryBackend::new());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn corrupt_storage_loads_empty() {
        let backend = MemoryBackend::with_contents("{not json");
        assert_eq!(store_with(&backend).len(), 0);

        let backend = MemoryBackend::with_contents(r#"[{"id": 1, "inputText": "x"}]"#);
        assert_eq!(store_with(&backend).len(), 0);
    }

    #[test]
    fn appends_newest_first() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);

        store.append(record(1)).unwrap();
        let records = store.append(record(2)).unwrap();

        assert_eq!(ids(records), vec![2, 1]);
    }

    #[test]
    fn reload_after_append_round_trips() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();

        let reloaded = store_with(&backend);
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.records()[0], record(2));
    }

    #[test]
    fn duplicate_id_is_appended_at_most_once() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(7)).unwrap();
        store.append(record(7)).unwrap();
        assert_eq!(ids(store.records()), vec![7]);
    }

    #[test]
    fn remove_by_id_persists() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();

        let records = store.remove_by_id(1).unwrap();
        assert_eq!(ids(records), vec![2]);
        assert_eq!(ids(store_with(&backend).records()), vec![2]);
    }

    #[test]
    fn remove_by_id_is_idempotent() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();

        let once = store.remove_by_id(2).unwrap().to_vec();
        let twice = store.remove_by_id(2).unwrap().to_vec();
        assert_eq!(once, twice);
        assert_eq!(ids(&twice), vec![1]);
    }

    #[test]
    fn remove_at_out_of_range_leaves_collection_unchanged() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        let persisted = backend.contents();

        let err = store.remove_at(5).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::IndexOutOfRange { index: 5, len: 2 }
        ));
        assert_eq!(ids(store.records()), vec![2, 1]);
        assert_eq!(backend.contents(), persisted);
    }

    #[test]
    fn remove_at_removes_by_position() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        store.append(record(3)).unwrap();

        let records = store.remove_at(1).unwrap();
        assert_eq!(ids(records), vec![3, 1]);
        assert_eq!(ids(store_with(&backend).records()), vec![3, 1]);
    }

    #[test]
    fn write_failure_keeps_memory_authoritative() {
        let backend = MemoryBackend::new();
        let mut store = store_with(&backend);
        store.append(record(1)).unwrap();

        backend.set_fail_writes(true);
        let err = store.append(record(2)).unwrap_err();
        assert!(matches!(err, HistoryError::Write(_)));
        assert_eq!(ids(store.records()), vec![2, 1]);
        assert_eq!(ids(store_with(&backend).records()), vec![1]);
    }

    #[test]
    fn limit_drops_oldest() {
        let backend = MemoryBackend::new();
        let mut store = HistoryStore::load(Box::new(backend.clone()), Some(2));
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        store.append(record(3)).unwrap();
        assert_eq!(ids(store.records()), vec![3, 2]);
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let stored = serde_json::to_vec(&vec![record(2), record(1), record(2)]).unwrap();
        let store = store_with(&MemoryBackend::with_contents(stored));
        assert_eq!(ids(store.records()), vec![2, 1]);
        assert_eq!(store.max_id(), 2);
    }

    #[test]
    fn load_drops_out_of_range_ids() {
        let stored = serde_json::to_vec(&vec![record(u64::MAX), record(1)]).unwrap();
        let store = store_with(&MemoryBackend::with_contents(stored));
        assert_eq!(ids(store.records()), vec![1]);
        assert_eq!(store.max_id(), 1);
    }

    #[test]
    fn file_backed_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr_history.json");

        let mut store = HistoryStore::load(Box::new(FileBackend::new(&path)), None);
        store.append(record(1)).unwrap();
        store.append(record(2)).unwrap();
        store.remove_by_id(1).unwrap();

        let reloaded = HistoryStore::load(Box::new(FileBackend::new(&path)), None);
        assert_eq!(ids(reloaded.records()), vec![2]);
    }
}
