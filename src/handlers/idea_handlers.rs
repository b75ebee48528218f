use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::csrf;
use crate::errors::{AppError, ValidationError, render};
use crate::flash::set_flash;
use crate::models::IdeaForm;
use crate::repository::IdeaStore;
use crate::templates_structs::{OrgOption, PageContext, SubmitTemplate};

use super::see_other;

fn form_page(session: &Session, form: IdeaForm, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "/");
    let organizations = OrgOption::list(Some(form.organization.trim()));
    render(SubmitTemplate { ctx, form, organizations, errors })
}

/// GET /
pub async fn form(session: Session) -> Result<HttpResponse, AppError> {
    form_page(&session, IdeaForm::default(), vec![])
}

/// POST /
/// Validates, inserts, then sends the author to the vote list.
pub async fn create(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    form: web::Form<IdeaForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let new_idea = match form.validate() {
        Ok(idea) => idea,
        Err(ValidationError(errors)) => return form_page(&session, form, errors),
    };

    match store.submit_idea(&new_idea).await {
        Ok(idea) => {
            log::info!("Idea {} submitted by {} for {}", idea.id, idea.author, idea.organization);
            set_flash(&session, "Idea submitted successfully");
            Ok(see_other("/vote"))
        }
        Err(e) => {
            log::error!("Error submitting idea: {e}");
            form_page(&session, form, vec!["Failed to submit idea. Please try again.".to_string()])
        }
    }
}
