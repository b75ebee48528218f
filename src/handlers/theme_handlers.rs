use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::csrf;
use crate::errors::AppError;
use crate::preferences;

use super::{CsrfOnly, safe_return_path, see_other};

/// POST /theme
/// Flip the dark-mode preference and go back where the user was.
pub async fn toggle(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let dark = preferences::toggle_dark_mode(&session);
    log::debug!("Dark mode {}", if dark { "enabled" } else { "disabled" });
    Ok(see_other(safe_return_path(form.return_to.as_deref(), "/")))
}
