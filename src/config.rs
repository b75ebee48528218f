use std::env;

use crate::errors::AppError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "catalyst-ideaboard";
pub const DEFAULT_LOGO_BUCKET: &str = "app-assets";

/// Which idea store backs the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Supabase { url: String, anon_key: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreKind,
    pub app_name: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub logo_bucket: String,
}

impl AppConfig {
    /// Load configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let get_either = |primary: &str, fallback: &str| get(primary).or_else(|| get(fallback));

        let store = match get("IDEABOARD_STORE").as_deref().unwrap_or("supabase") {
            "memory" => StoreKind::Memory,
            "supabase" => {
                let url = get_either("SUPABASE_URL", "VITE_SUPABASE_URL");
                let anon_key = get_either("SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY");
                match (url, anon_key) {
                    (Some(url), Some(anon_key)) => StoreKind::Supabase {
                        url: url.trim_end_matches('/').to_string(),
                        anon_key,
                    },
                    _ => {
                        return Err(AppError::Config(
                            "Missing Supabase environment variables (SUPABASE_URL, SUPABASE_ANON_KEY)"
                                .to_string(),
                        ));
                    }
                }
            }
            other => {
                return Err(AppError::Config(format!(
                    "IDEABOARD_STORE must be 'supabase' or 'memory', got '{other}'"
                )));
            }
        };

        Ok(Self {
            store,
            app_name: get("IDEABOARD_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: get("SESSION_KEY"),
            logo_bucket: get("LOGO_BUCKET").unwrap_or_else(|| DEFAULT_LOGO_BUCKET.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn supabase_requires_url_and_key() {
        let err = AppConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.supabase.co")]));
        assert!(matches!(err, Err(AppError::Config(_))));
    }

    #[test]
    fn vite_prefixed_names_are_accepted() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://x.supabase.co/"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.store,
            StoreKind::Supabase { url: "https://x.supabase.co".into(), anon_key: "anon".into() }
        );
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn memory_store_needs_no_credentials() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("IDEABOARD_STORE", "memory"),
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("SESSION_KEY", "  "),
        ]))
        .unwrap();
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
        assert!(cfg.session_key.is_none());
    }

    #[test]
    fn unknown_store_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("IDEABOARD_STORE", "sqlite")]));
        assert!(matches!(err, Err(AppError::Config(_))));
    }
}
