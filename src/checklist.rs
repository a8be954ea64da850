//! Checklist State
//!
//! Checkbox id -> checked, persisted as one JSON object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;
use crate::storage::{KeyValueStore, CHECKLIST_KEY};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistState(BTreeMap<String, bool>);

impl ChecklistState {
    /// Stored state, or empty. A value that does not decode is logged and removed.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.read(CHECKLIST_KEY) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                let err = ShowcaseError::MalformedState {
                    key: CHECKLIST_KEY.to_string(),
                    reason: e.to_string(),
                };
                log::error!("{}", err);
                store.delete(CHECKLIST_KEY);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), ShowcaseError> {
        let json = serde_json::to_string(self)?;
        store.write(CHECKLIST_KEY, &json)
    }

    pub fn set(&mut self, id: &str, checked: bool) {
        self.0.insert(id.to_string(), checked);
    }

    /// Ids never recorded read as unchecked
    pub fn is_checked(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn test_missing_state_is_empty() {
        let store = MemoryStore::default();
        let state = ChecklistState::load(&store);
        assert!(state.is_empty());
        assert!(!state.is_checked("passport"));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::default();
        let mut state = ChecklistState::default();
        state.set("passport", true);
        state.set("tickets", false);
        state.save(&store).unwrap();

        assert_eq!(store.read(CHECKLIST_KEY).as_deref(), Some(r#"{"passport":true,"tickets":false}"#));
        let loaded = ChecklistState::load(&store);
        assert_eq!(loaded, state);
        assert!(loaded.is_checked("passport"));
        assert!(!loaded.is_checked("tickets"));
        assert!(!loaded.is_checked("snacks"));
    }

    #[test]
    fn test_toggle_overwrites() {
        let mut state = ChecklistState::default();
        state.set("a", true);
        state.set("a", false);
        assert_eq!(state.len(), 1);
        assert!(!state.is_checked("a"));
    }

    #[test]
    fn test_malformed_state_is_removed() {
        let store = MemoryStore::with(CHECKLIST_KEY, "{broken");
        assert!(ChecklistState::load(&store).is_empty());
        assert!(!store.contains(CHECKLIST_KEY));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let store = MemoryStore::with(CHECKLIST_KEY, r#"{"a":"yes"}"#);
        assert!(ChecklistState::load(&store).is_empty());
        assert!(!store.contains(CHECKLIST_KEY));

        let store = MemoryStore::with(CHECKLIST_KEY, "[true]");
        assert!(ChecklistState::load(&store).is_empty());
    }
}
