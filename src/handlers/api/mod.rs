pub mod ideas;
pub mod logo;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header},
    middleware::Next,
    web,
};

use crate::storage::MAX_UPLOAD_BYTES;
use crate::templates_structs::ApiErrorResponse;

/// Guard for `/api/ideas` votes, comments and deletes.
///
/// Votes are keyed to the session cookie's voter id, so a foreign page must
/// not be able to post them. Mutations need `Content-Type: application/json`,
/// which a plain HTML form cannot send. The logo route sits outside this
/// scope because its body is the raw image.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if is_mutation(req.method()) && !declares_json(&req) {
        log::warn!("Rejected {} {} without a JSON content type", req.method(), req.path());
        let body = ApiErrorResponse::new("Content-Type must be application/json");
        return Ok(req
            .into_response(HttpResponse::BadRequest().json(body))
            .map_into_right_body());
    }
    next.call(req).await.map(|res| res.map_into_left_body())
}

fn is_mutation(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

fn declares_json(req: &ServiceRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"))
}

/// Configure /api routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ideas")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(ideas::list))
            .route("/{id}", web::delete().to(ideas::delete))
            .route("/{id}/vote", web::post().to(ideas::vote))
            .route("/{id}/comments", web::post().to(ideas::comment)),
    );
    cfg.service(
        web::resource("/logo")
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .route(web::get().to(logo::show))
            .route(web::post().to(logo::upload)),
    );
}
