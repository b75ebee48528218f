use std::collections::HashSet;

use crate::local_store::{DARK_MODE_KEY, LocalStore, VOTED_IDEAS_KEY};

pub fn dark_mode(local: &impl LocalStore) -> bool {
    local.get_item(DARK_MODE_KEY).as_deref() == Some("true")
}

pub fn set_dark_mode(local: &impl LocalStore, enabled: bool) {
    local.set_item(DARK_MODE_KEY, if enabled { "true" } else { "false" });
}

/// Flip the preference and return the new value.
pub fn toggle_dark_mode(local: &impl LocalStore) -> bool {
    let enabled = !dark_mode(local);
    set_dark_mode(local, enabled);
    enabled
}

/// Voted idea ids as last persisted. Unreadable data counts as "none".
pub fn load_voted_ideas(local: &impl LocalStore) -> HashSet<String> {
    let Some(raw) = local.get_item(VOTED_IDEAS_KEY) else {
        return HashSet::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            log::warn!("Discarding malformed voted-ideas value: {e}");
            HashSet::new()
        }
    }
}

pub fn save_voted_ideas(local: &impl LocalStore, voted: &HashSet<String>) {
    let mut ids: Vec<&String> = voted.iter().collect();
    ids.sort();
    match serde_json::to_string(&ids) {
        Ok(json) => local.set_item(VOTED_IDEAS_KEY, &json),
        Err(e) => log::error!("Failed to serialize voted ideas: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::MemoryLocalStore;

    #[test]
    fn dark_mode_defaults_off_and_toggles() {
        let local = MemoryLocalStore::new();
        assert!(!dark_mode(&local));
        assert!(toggle_dark_mode(&local));
        assert_eq!(local.get_item(DARK_MODE_KEY).as_deref(), Some("true"));
        assert!(!toggle_dark_mode(&local));
        assert!(!dark_mode(&local));
    }

    #[test]
    fn voted_ideas_are_stored_sorted() {
        let local = MemoryLocalStore::new();
        let voted: HashSet<String> = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
        save_voted_ideas(&local, &voted);
        assert_eq!(local.get_item(VOTED_IDEAS_KEY).as_deref(), Some(r#"["a","b","c"]"#));
        assert_eq!(load_voted_ideas(&local), voted);
    }

    #[test]
    fn malformed_voted_ideas_load_as_empty() {
        let local = MemoryLocalStore::new();
        local.set_item(VOTED_IDEAS_KEY, "{not json");
        assert!(load_voted_ideas(&local).is_empty());
    }
}
