//! Local Persistence
//!
//! Key-value access to browser local storage behind a small trait so the
//! countdown and checklist logic can run against an in-memory store.

use crate::error::ShowcaseError;

/// Target date for the countdown, stored as `YYYY-MM-DD`
pub const TARGET_DATE_KEY: &str = "targetEventDate";
/// Checklist state, stored as a JSON object of id -> bool
pub const CHECKLIST_KEY: &str = "checklistState";

pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), ShowcaseError>;
    fn delete(&self, key: &str);
}

impl KeyValueStore for web_sys::Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ShowcaseError> {
        self.set_item(key, value).map_err(ShowcaseError::from)
    }

    fn delete(&self, key: &str) {
        let _ = self.remove_item(key);
    }
}

/// The window's local storage, if the browser grants access to it
pub fn local_storage() -> Result<web_sys::Storage, ShowcaseError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(ShowcaseError::StorageUnavailable)
}

#[cfg(test)]
pub mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::KeyValueStore;
    use crate::error::ShowcaseError;

    /// In-memory store for tests
    #[derive(Default)]
    pub struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub fn with(key: &str, value: &str) -> Self {
            let store = Self::default();
            store.entries.borrow_mut().insert(key.to_string(), value.to_string());
            store
        }

        pub fn contains(&self, key: &str) -> bool {
            self.entries.borrow().contains_key(key)
        }
    }

    impl KeyValueStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) -> Result<(), ShowcaseError> {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }
}
