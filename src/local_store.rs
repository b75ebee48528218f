//! Per-browser durable key/value storage.
//!
//! In the running server this is the signed, persistent session cookie, so
//! every browser profile carries its own values. Services that need it take
//! a `&impl LocalStore` instead of reaching for globals.

use std::collections::HashMap;
use std::sync::Mutex;

use actix_session::Session;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const VOTER_ID_KEY: &str = "voterId";
pub const VOTED_IDEAS_KEY: &str = "votedIdeas";

pub trait LocalStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

impl LocalStore for Session {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.get::<String>(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Unreadable session value for {key}: {e}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = self.insert(key, value) {
            log::error!("Failed to persist session value for {key}: {e}");
        }
    }
}

/// Map-backed store for tests and non-HTTP callers.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let map = self.items.lock().unwrap_or_else(|e| e.into_inner());
        map.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        let mut map = self.items.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(key.to_string(), value.to_string());
    }
}
