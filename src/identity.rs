use crate::local_store::{LocalStore, VOTER_ID_KEY};

/// Return this browser's voter id, creating and persisting one on first use.
///
/// The id only deduplicates votes; it is never used to authenticate anyone.
pub fn get_or_create_voter_id(local: &impl LocalStore) -> String {
    if let Some(id) = local.get_item(VOTER_ID_KEY).filter(|id| !id.trim().is_empty()) {
        return id;
    }
    let id = uuid::Uuid::new_v4().to_string();
    local.set_item(VOTER_ID_KEY, &id);
    log::debug!("Issued new voter id {id}");
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::MemoryLocalStore;

    #[test]
    fn voter_id_is_stable_per_store() {
        let local = MemoryLocalStore::new();
        let first = get_or_create_voter_id(&local);
        let second = get_or_create_voter_id(&local);
        assert_eq!(first, second);
        assert!(uuid::Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn separate_stores_get_separate_ids() {
        let a = get_or_create_voter_id(&MemoryLocalStore::new());
        let b = get_or_create_voter_id(&MemoryLocalStore::new());
        assert_ne!(a, b);
    }

    #[test]
    fn blank_stored_id_is_replaced() {
        let local = MemoryLocalStore::new();
        local.set_item(VOTER_ID_KEY, "  ");
        let id = get_or_create_voter_id(&local);
        assert!(!id.trim().is_empty());
        assert_eq!(local.get_item(VOTER_ID_KEY), Some(id));
    }

    #[test]
    fn existing_id_is_kept() {
        let local = MemoryLocalStore::new();
        local.set_item(VOTER_ID_KEY, "V1");
        assert_eq!(get_or_create_voter_id(&local), "V1");
    }
}
