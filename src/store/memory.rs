use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use crate::store::error::StoreError;
use crate::store::program::{NewProgram, Program, ProgramPatch};
use crate::store::ProgramStore;

/// In-memory stand-in for the remote store, used by the test suite.
///
/// Mirrors the remote store's non-erroring write semantics: when
/// `restrict_writes` is on, updates and deletes succeed at the HTTP level but
/// touch zero rows, which is how row-level security presents itself through
/// PostgREST.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    restrict_writes: AtomicBool,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Program>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent updates/deletes affect zero rows without erroring.
    pub fn restrict_writes(&self, restricted: bool) {
        self.restrict_writes.store(restricted, Ordering::SeqCst);
    }

    fn writes_restricted(&self) -> bool {
        self.restrict_writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProgramStore for MemoryStore {
    async fn insert(&self, program: &NewProgram) -> Result<Option<Program>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let row = Program {
            id: inner.next_id,
            title: program.title.clone(),
            total_sessions: program.total_sessions,
            status: program.status.clone(),
            created_at: Utc::now(),
        };
        inner.rows.insert(row.id, row.clone());
        Ok(Some(row))
    }

    async fn list(&self) -> Result<Vec<Program>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Program> = inner.rows.values().cloned().collect();
        // Newest first; ties broken by id so ordering stays deterministic.
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Program>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: &ProgramPatch) -> Result<Option<Program>, StoreError> {
        if self.writes_restricted() {
            return Ok(None);
        }
        let mut inner = self.inner.lock().unwrap();
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            // A null title would be rejected by the real store's NOT NULL
            // constraint; surface it the same way.
            match title {
                Some(title) => row.title = title.clone(),
                None => {
                    return Err(StoreError::Remote {
                        status: 400,
                        message: "null value in column \"title\" violates not-null constraint"
                            .to_string(),
                        details: None,
                    })
                }
            }
        }
        if let Some(total_sessions) = patch.total_sessions {
            row.total_sessions = total_sessions;
        }
        if let Some(status) = &patch.status {
            row.status = status.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Program>, StoreError> {
        if self.writes_restricted() {
            return Ok(None);
        }
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.rows.remove(&id))
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.contains_key(&id))
    }
}
