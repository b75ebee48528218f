use std::sync::Arc;

use crate::config::{AppConfig, StoreKind};
use crate::errors::AppError;
use crate::gateway::RestGateway;
use crate::repository::{MemoryStore, SharedStore, SupabaseStore};
use crate::storage::{LogoStore, ObjectStorage};

/// Handles to the external services the web layer talks to.
pub struct Backends {
    pub store: SharedStore,
    pub logo: LogoStore,
}

pub fn init(config: &AppConfig) -> Result<Backends, AppError> {
    match &config.store {
        StoreKind::Supabase { url, anon_key } => {
            let gateway = RestGateway::new(url, anon_key, &config.app_name)
                .map_err(|e| AppError::Config(e.to_string()))?;
            log::info!("Using Supabase store at {url}");
            Ok(Backends {
                store: Arc::new(SupabaseStore::new(gateway.clone())),
                logo: LogoStore::new(Some(ObjectStorage::new(gateway)), &config.logo_bucket),
            })
        }
        StoreKind::Memory => {
            log::warn!("Using in-memory store; ideas are lost on restart");
            Ok(Backends {
                store: Arc::new(MemoryStore::new()),
                logo: LogoStore::disabled(),
            })
        }
    }
}
