//! In-memory session store, for tests and for shells that manage their
//! own persistence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::error::AppError;
use crate::domain::session::Session;
use crate::ports::{SessionStore, SnapshotInfo};

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    snapshots: BTreeMap<String, (DateTime<Utc>, Session)>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, name: &str, session: &Session) -> Result<(), AppError> {
        self.snapshots.insert(name.to_string(), (Utc::now(), session.clone()));
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Session, AppError> {
        self.snapshots
            .get(name)
            .map(|(_, session)| session.clone())
            .ok_or_else(|| AppError::SnapshotNotFound(name.to_string()))
    }

    fn list(&self) -> Vec<SnapshotInfo> {
        let mut infos: Vec<SnapshotInfo> = self
            .snapshots
            .iter()
            .map(|(name, (saved_at, _))| SnapshotInfo { name: name.clone(), saved_at: *saved_at })
            .collect();
        infos.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        infos
    }

    fn remove(&mut self, name: &str) -> Result<(), AppError> {
        self.snapshots
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| AppError::SnapshotNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_roundtrips() {
        let mut store = MemorySessionStore::new();
        let mut session = Session::default();
        session.global.interaction = "walking together".to_string();

        store.save("draft", &session).unwrap();
        assert_eq!(store.load("draft").unwrap(), session);
    }

    #[test]
    fn load_missing_is_an_error() {
        let store = MemorySessionStore::new();
        assert!(matches!(
            store.load("nope"),
            Err(AppError::SnapshotNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn list_is_newest_first() {
        let mut store = MemorySessionStore::new();
        let session = Session::default();
        store.save("first", &session).unwrap();
        store.save("second", &session).unwrap();

        let infos = store.list();
        assert_eq!(infos.len(), 2);
        assert!(infos[0].saved_at >= infos[1].saved_at);
    }

    #[test]
    fn remove_missing_is_an_error() {
        let mut store = MemorySessionStore::new();
        store.save("keep", &Session::default()).unwrap();

        store.remove("keep").unwrap();
        assert!(store.remove("keep").is_err());
    }
}
