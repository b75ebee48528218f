/// Integration tests for the HTTP surface: server-rendered pages with CSRF
/// protected forms, and the JSON API used for optimistic voting.

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use ideaboard::errors::StoreError;
use ideaboard::repository::{IdeaStore, MemoryStore};

mod common;
use common::{csrf_token, location, seeded_store, session_cookie, test_app};

async fn body_text<B: actix_web::body::MessageBody>(resp: actix_web::dev::ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_submit_page_renders_form() {
    let app = test::init_service(test_app(seeded_store().await)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Catalyst Group Ideaboard"));
    assert!(html.contains(r#"name="title""#));
    assert!(html.contains("Impact Catalysts Foundation"));
    assert_eq!(csrf_token(&html).len(), 64);
}

#[actix_rt::test]
async fn test_unknown_route_returns_404() {
    let app = test::init_service(test_app(seeded_store().await)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_vote_page_filters_by_organization() {
    let app = test::init_service(test_app(seeded_store().await)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/vote").to_request()).await;
    let html = body_text(resp).await;
    assert!(html.contains("Solar lights"));
    assert!(html.contains("Mentoring circles"));

    let req = test::TestRequest::get().uri("/vote?org=Swasti").to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Mentoring circles"));
    assert!(!html.contains("Solar lights"));

    let req = test::TestRequest::get().uri("/vote?org=Fuzhio").to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("There are no ideas for Fuzhio yet"));
    assert!(html.contains(r#"href="/vote?filters=1&amp;org=Green+Foundation""#));
}

#[actix_rt::test]
async fn test_vote_page_reports_load_failure() {
    let store = seeded_store().await;
    store.set_unreachable(true);
    let app = test::init_service(test_app(store)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/vote").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Failed to load ideas. Please refresh the page."));
}

#[actix_rt::test]
async fn test_leaderboard_ranks_by_votes() {
    let app = test::init_service(test_app(seeded_store().await)).await;
    let req = test::TestRequest::get().uri("/leaderboard").to_request();
    let html = body_text(test::call_service(&app, req).await).await;

    let top = html.find("Mentoring circles").expect("I2 listed");
    let second = html.find("Solar lights").expect("I1 listed");
    let third = html.find("Seed library").expect("I3 listed");
    assert!(top < second && second < third);
}

#[actix_rt::test]
async fn test_leaderboard_empty_state() {
    let app = test::init_service(test_app(std::sync::Arc::new(MemoryStore::new()))).await;
    let req = test::TestRequest::get().uri("/leaderboard").to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("No ideas have been submitted yet."));
}

#[actix_rt::test]
async fn test_health_reflects_store() {
    let store = seeded_store().await;
    let app = test::init_service(test_app(store.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");

    store.set_unreachable(true);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_submit_idea_redirects_with_flash() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    let token = csrf_token(&body_text(resp).await);

    let req = test::TestRequest::post()
        .uri("/")
        .cookie(cookie.clone())
        .set_form([
            ("title", "Solar lights"),
            ("description", "Install solar lights in the village"),
            ("author", "Asha"),
            ("organization", "Vrutti"),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/vote");
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let ideas = store.fetch_ideas().await.expect("fetch");
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].votes, 0);

    let req = test::TestRequest::get().uri("/vote").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Idea submitted successfully"));
    assert!(html.contains("Solar lights"));
}

#[actix_rt::test]
async fn test_invalid_submission_shows_errors() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    let token = csrf_token(&body_text(resp).await);

    let req = test::TestRequest::post()
        .uri("/")
        .cookie(cookie)
        .set_form([
            ("title", "   "),
            ("description", "Something"),
            ("author", "Asha"),
            ("organization", ""),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Idea is required"));
    assert!(html.contains("Organization is required"));
    assert!(store.fetch_ideas().await.expect("fetch").is_empty());
}

#[actix_rt::test]
async fn test_form_post_without_csrf_is_forbidden() {
    let store = seeded_store().await;
    let app = test::init_service(test_app(store.clone())).await;

    let req = test::TestRequest::post()
        .uri("/vote/I1/delete")
        .set_form([("csrf_token", "forged")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.fetch_ideas().await.expect("fetch").len(), 3);
}

#[actix_rt::test]
async fn test_form_vote_marks_card_voted() {
    let store = seeded_store().await;
    let app = test::init_service(test_app(store.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/vote").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    let token = csrf_token(&body_text(resp).await);
    assert_eq!(store.vote_call_count(), 0);

    let req = test::TestRequest::post()
        .uri("/vote/I1")
        .cookie(cookie.clone())
        .set_form([("csrf_token", token.as_str()), ("return_to", "/vote?org=Vrutti")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/vote?org=Vrutti");
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let req = test::TestRequest::get().uri("/vote?org=Vrutti").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains(" disabled>"));
    assert!(html.contains("&#9650; 4"));
}

#[actix_rt::test]
async fn test_form_vote_failure_flashes_error() {
    let store = seeded_store().await;
    store
        .set_vote_failure(Some(StoreError::Remote("timeout".to_string())))
        .await;
    let app = test::init_service(test_app(store.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/vote").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    let token = csrf_token(&body_text(resp).await);

    let req = test::TestRequest::post()
        .uri("/vote/I1")
        .cookie(cookie.clone())
        .set_form([("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/vote");
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let req = test::TestRequest::get().uri("/vote").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Failed to register vote. Please try again."));
    assert!(!html.contains(" disabled>"));
}

#[actix_rt::test]
async fn test_theme_toggle_persists_dark_mode() {
    let app = test::init_service(test_app(seeded_store().await)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/leaderboard").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    let html = body_text(resp).await;
    assert!(!html.contains(r#"<body class="dark">"#));
    let token = csrf_token(&html);

    let req = test::TestRequest::post()
        .uri("/theme")
        .cookie(cookie.clone())
        .set_form([("csrf_token", token.as_str()), ("return_to", "/leaderboard")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/leaderboard");
    let cookie = session_cookie(&resp).unwrap_or(cookie);

    let req = test::TestRequest::get().uri("/leaderboard").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains(r#"<body class="dark">"#));
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_api_vote_then_repeat_is_already_voted() {
    let store = seeded_store().await;
    let app = test::init_service(test_app(store.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/ideas/I1/vote")
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("session cookie");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "recorded");
    assert_eq!(body["votes"], 4);

    let req = test::TestRequest::post()
        .uri("/api/ideas/I1/vote")
        .insert_header(("content-type", "application/json"))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "already_voted");
    assert_eq!(body["votes"], 4);
    assert_eq!(store.vote_call_count(), 1);

    let req = test::TestRequest::get().uri("/api/ideas").cookie(cookie).to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["voted"], serde_json::json!(["I1"]));
    assert_eq!(body["ideas"].as_array().map(Vec::len), Some(3));
}

#[actix_rt::test]
async fn test_api_vote_failure_reports_rolled_back_count() {
    let store = seeded_store().await;
    store
        .set_vote_failure(Some(StoreError::Remote("timeout".to_string())))
        .await;
    let app = test::init_service(test_app(store.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/ideas/I1/vote")
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["idea_id"], "I1");
    assert_eq!(body["votes"], 3);
}

#[actix_rt::test]
async fn test_api_mutation_requires_json_content_type() {
    let store = seeded_store().await;
    let app = test::init_service(test_app(store.clone())).await;

    let req = test::TestRequest::post().uri("/api/ideas/I1/vote").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.vote_call_count(), 0);
}

#[actix_rt::test]
async fn test_api_comment_and_delete() {
    let store = seeded_store().await;
    let app = test::init_service(test_app(store.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/ideas/I2/comments")
        .set_json(serde_json::json!({ "text": "Count me in", "author": "Ravi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["text"], "Count me in");

    let req = test::TestRequest::post()
        .uri("/api/ideas/I2/comments")
        .set_json(serde_json::json!({ "text": "", "author": "Ravi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri("/api/ideas/I2")
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.fetch_ideas().await.expect("fetch").len(), 2);
}

#[actix_rt::test]
async fn test_api_logo_without_storage() {
    let app = test::init_service(test_app(seeded_store().await)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/logo").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/logo")
        .insert_header(("content-type", "text/plain"))
        .set_payload("not an image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Please upload an image file");
}
