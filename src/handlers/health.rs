use actix_web::{HttpResponse, web};

use crate::repository::IdeaStore;
use crate::templates_structs::HealthResponse;

/// GET /health
/// Probes the idea store with a one-row query.
pub async fn check(store: web::Data<dyn IdeaStore>) -> HttpResponse {
    let store_tag = store.backend_tag();
    if store.check_connection().await {
        HttpResponse::Ok().json(HealthResponse { status: "ok", store: store_tag })
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse { status: "unavailable", store: store_tag })
    }
}
