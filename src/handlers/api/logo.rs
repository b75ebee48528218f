use actix_web::{HttpRequest, HttpResponse, web};

use crate::errors::AppError;
use crate::storage::LogoStore;
use crate::templates_structs::{ApiErrorResponse, LogoResponse};

/// GET /api/logo - Public URL of the uploaded logo
pub async fn show(logo: web::Data<LogoStore>) -> Result<HttpResponse, AppError> {
    match logo.current_url().await? {
        Some(url) => Ok(HttpResponse::Ok().json(LogoResponse { url })),
        None => Ok(HttpResponse::NotFound().json(ApiErrorResponse::new("No logo uploaded"))),
    }
}

/// POST /api/logo - Replace the logo; body is the raw image
pub async fn upload(
    req: HttpRequest,
    logo: web::Data<LogoStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    match logo.upload(body.to_vec(), content_type).await {
        Ok(url) => {
            log::info!("Logo uploaded to {url}");
            Ok(HttpResponse::Ok().json(LogoResponse { url }))
        }
        Err(AppError::Validation(e)) => {
            Ok(HttpResponse::BadRequest().json(ApiErrorResponse::new(e.0.join("; "))))
        }
        Err(e) => Err(e),
    }
}
