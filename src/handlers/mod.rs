pub mod api;
pub mod health;
pub mod idea_handlers;
pub mod leaderboard_handlers;
pub mod theme_handlers;
pub mod vote_handlers;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

/// Form carrying only the CSRF token and an optional page to return to.
#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// 303 redirect (post/redirect/get).
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Accept only same-site absolute paths as redirect targets.
pub fn safe_return_path<'a>(candidate: Option<&'a str>, fallback: &'a str) -> &'a str {
    match candidate {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => fallback,
    }
}

pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Register every route. The default (404) service is added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(idea_handlers::form))
        .route("/", web::post().to(idea_handlers::create))
        .route("/vote", web::get().to(vote_handlers::list))
        .route("/vote/{id}", web::post().to(vote_handlers::vote))
        .route("/vote/{id}/comments", web::post().to(vote_handlers::comment))
        .route("/vote/{id}/delete", web::post().to(vote_handlers::delete))
        .route("/leaderboard", web::get().to(leaderboard_handlers::index))
        .route("/theme", web::post().to(theme_handlers::toggle))
        .route("/health", web::get().to(health::check))
        .service(web::scope("/api").configure(api::configure));
}
