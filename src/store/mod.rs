pub mod error;
pub mod memory;
pub mod program;
pub mod rest;

pub use error::StoreError;
pub use program::{NewProgram, Program, ProgramPatch};

/// Seam between the HTTP handlers and the remote store. Handlers receive one
/// shared `Arc<dyn ProgramStore>` built at process start; tests substitute
/// [`memory::MemoryStore`].
#[async_trait::async_trait]
pub trait ProgramStore: Send + Sync {
    /// Insert one program and return the stored row, or `None` when the
    /// store reported success but echoed nothing back.
    async fn insert(&self, program: &NewProgram) -> Result<Option<Program>, StoreError>;

    /// All programs, newest first by `created_at`.
    async fn list(&self) -> Result<Vec<Program>, StoreError>;

    async fn fetch(&self, id: i64) -> Result<Option<Program>, StoreError>;

    /// Apply a partial update by id. `None` means zero rows were affected,
    /// which is ambiguous on its own; see [`resolve_update`].
    async fn update(&self, id: i64, patch: &ProgramPatch) -> Result<Option<Program>, StoreError>;

    /// Delete by id, returning the deleted row when the store echoes it.
    async fn delete(&self, id: i64) -> Result<Option<Program>, StoreError>;

    async fn exists(&self, id: i64) -> Result<bool, StoreError>;
}

/// Outcome of an update, with the store's ambiguous zero-rows case split by
/// an explicit existence check.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Program),
    NotFound,
    /// The row exists but the write touched nothing: either the values were
    /// unchanged or an access policy silently suppressed the write.
    NoEffect,
}

/// Outcome of a delete. The existence check runs before the delete call so a
/// no-op delete on a missing row is reported as `NotFound` rather than as a
/// misleading success.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted(Program),
    NotFound,
    /// The row existed a moment ago but the delete returned nothing: already
    /// gone, or suppressed by an access policy. The store does not say which.
    NoEffect,
}

pub async fn resolve_update(
    store: &dyn ProgramStore,
    id: i64,
    patch: &ProgramPatch,
) -> Result<UpdateOutcome, StoreError> {
    if let Some(updated) = store.update(id, patch).await? {
        return Ok(UpdateOutcome::Updated(updated));
    }
    if store.exists(id).await? {
        Ok(UpdateOutcome::NoEffect)
    } else {
        Ok(UpdateOutcome::NotFound)
    }
}

pub async fn resolve_delete(store: &dyn ProgramStore, id: i64) -> Result<DeleteOutcome, StoreError> {
    if !store.exists(id).await? {
        return Ok(DeleteOutcome::NotFound);
    }
    match store.delete(id).await? {
        Some(deleted) => Ok(DeleteOutcome::Deleted(deleted)),
        None => Ok(DeleteOutcome::NoEffect),
    }
}
