use super::domain::ReceiptId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "no points recorded for that identifier"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Identifier-keyed points storage. Insert-once and lookup only; entries are
/// never updated or deleted.
pub trait PointsStore: Send + Sync {
    /// Records a score under a freshly generated identifier and returns it.
    fn put(&self, points: u64) -> Result<ReceiptId, StoreError>;

    /// Looks up a previously recorded score.
    fn get(&self, id: &ReceiptId) -> Result<u64, StoreError>;
}

/// Process-lifetime store backed by a mutex-guarded map. Grows without bound
/// under sustained submissions; callers needing capacity limits enforce them
/// upstream.
#[derive(Default)]
pub struct InMemoryPointsStore {
    entries: Mutex<HashMap<ReceiptId, u64>>,
}

impl PointsStore for InMemoryPointsStore {
    fn put(&self, points: u64) -> Result<ReceiptId, StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        loop {
            let id = ReceiptId(Uuid::new_v4().to_string());
            match guard.entry(id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(points);
                    return Ok(id);
                }
                // A v4 collision is nearly impossible; try again rather
                // than overwrite an existing entry.
                Entry::Occupied(_) => continue,
            }
        }
    }

    fn get(&self, id: &ReceiptId) -> Result<u64, StoreError> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        guard.get(id).copied().ok_or(StoreError::NotFound)
    }
}
