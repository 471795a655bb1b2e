//! Trait seams toward external collaborators: the category catalog the
//! engine reads from, and the session store the surrounding shell persists
//! snapshots into. The engine itself never calls a store.

use chrono::{DateTime, Utc};

use crate::domain::category::{CategoryEntry, CategoryId, OptionRecord};
use crate::domain::error::AppError;
use crate::domain::session::Session;

/// Read access to the category catalog.
pub trait CategoryCatalog {
    /// The loaded entry for a category, if the catalog carries one.
    fn entry(&self, id: CategoryId) -> Option<&CategoryEntry>;

    /// Look up one option record by its stable value.
    fn option(&self, id: CategoryId, value: &str) -> Option<&OptionRecord> {
        self.entry(id).and_then(|entry| entry.option(value))
    }
}

/// Metadata for one saved session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

/// Named session snapshots (history, favorites, saved profiles).
///
/// Explicit load/save operations only; the composition engine receives a
/// snapshot and returns a value, it never touches the store.
pub trait SessionStore {
    fn save(&mut self, name: &str, session: &Session) -> Result<(), AppError>;

    /// Load a snapshot by name. `SnapshotNotFound` when absent.
    fn load(&self, name: &str) -> Result<Session, AppError>;

    /// All snapshots, most recently saved first.
    fn list(&self) -> Vec<SnapshotInfo>;

    fn remove(&mut self, name: &str) -> Result<(), AppError>;
}
