//! Shared test infrastructure for store, coordinator and handler tests.
//!
//! - `idea()` - Build an idea with a fixed timestamp
//! - `seeded_store()` - In-memory store with a few ideas across organizations
//! - `test_app()` - The full route table over a given store, sessions in cookies

#![allow(dead_code)]

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    App, Error,
    body::MessageBody,
    cookie::{Cookie, Key},
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;

use ideaboard::handlers;
use ideaboard::models::{Idea, Organization};
use ideaboard::repository::{IdeaStore, MemoryStore};
use ideaboard::storage::LogoStore;

// ============================================================================
// FIXTURES
// ============================================================================

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap()
}

/// Idea `id` with `votes` votes, created on 2024-05-`day`.
pub fn idea(id: &str, title: &str, org: Organization, votes: u32, day: u32) -> Idea {
    Idea {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("About {title}"),
        author: "Asha".to_string(),
        organization: org,
        votes,
        created_at: at(day),
        comments: Vec::new(),
    }
}

/// I1 (Vrutti, 3 votes, oldest), I2 (Swasti, 7 votes), I3 (Vrutti, 0 votes, newest).
pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_idea(idea("I1", "Solar lights", Organization::Vrutti, 3, 1)).await;
    store.insert_idea(idea("I2", "Mentoring circles", Organization::Swasti, 7, 2)).await;
    store.insert_idea(idea("I3", "Seed library", Organization::Vrutti, 0, 3)).await;
    store
}

// ============================================================================
// HTTP
// ============================================================================

/// The full route table over `store`, with a throwaway session key and no logo storage.
pub fn test_app(
    store: Arc<MemoryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let shared: Arc<dyn IdeaStore> = store;
    App::new()
        .wrap(
            SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                .cookie_secure(false)
                .build(),
        )
        .app_data(web::Data::from(shared))
        .app_data(web::Data::new(LogoStore::disabled()))
        .configure(handlers::configure)
        .default_service(web::to(handlers::not_found))
}

/// The session cookie set by `resp`, if the session changed.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

/// The CSRF token embedded in a rendered page.
pub fn csrf_token(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .map(|c| c[1].to_string())
        .expect("page has no csrf token")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
