use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use std::fmt;

/// Failure of a store operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store was unreachable or rejected the request.
    Remote(String),
    /// The (idea, voter) pair already has a vote record.
    DuplicateVote,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Remote(e) => write!(f, "Remote error: {e}"),
            StoreError::DuplicateVote => write!(f, "Duplicate vote"),
        }
    }
}

impl std::error::Error for StoreError {}

/// One or more form fields failed validation. Caught before any store call.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError(pub Vec<String>);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error: {}", self.0.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Validation(ValidationError),
    Template(askama::Error),
    Csrf,
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "{e}"),
            AppError::Validation(e) => write!(f, "{e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::DuplicateVote) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Remote(_)) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Csrf => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            AppError::Validation(e) => HttpResponse::BadRequest().body(e.0.join("\n")),
            AppError::Store(StoreError::DuplicateVote) => {
                HttpResponse::Conflict().body("You have already voted for this idea")
            }
            AppError::Store(StoreError::Remote(_)) => {
                log::error!("{self}");
                HttpResponse::BadGateway().body("The idea store is unavailable")
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an Askama template into an HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
