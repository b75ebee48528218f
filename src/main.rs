use actix_session::{SessionMiddleware, config::PersistentSession, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, cookie::time::Duration, middleware, web};

use ideaboard::{backend, config::AppConfig, handlers};

/// Browser-held state (voter id, votes, theme) should outlive any visit.
const SESSION_TTL_DAYS: i64 = 365;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let backends = backend::init(&config).map_err(|e| {
        log::error!("{e}");
        std::io::Error::other(e.to_string())
    })?;

    if backends.store.check_connection().await {
        log::info!("Connected to {} store", backends.store.backend_tag());
    } else {
        log::error!("Failed to connect to {} store", backends.store.backend_tag());
    }

    // Session signing key: load from SESSION_KEY for cookies that survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (voter ids lost on restart)");
            Key::generate()
        }
    };

    let store = web::Data::from(backends.store);
    let logo = web::Data::new(backends.logo);

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::days(SESSION_TTL_DAYS)))
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(logo.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
