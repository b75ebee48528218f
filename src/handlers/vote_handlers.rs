use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::coordinator::{VoteCoordinator, VoteOutcome};
use crate::csrf;
use crate::errors::{AppError, StoreError, ValidationError, render};
use crate::flash::{set_error, set_flash};
use crate::models::{CommentForm, Organization};
use crate::repository::IdeaStore;
use crate::templates_structs::{IdeaCard, OrgOption, PageContext, VoteTemplate};

use super::{CsrfOnly, safe_return_path, see_other};

#[derive(Debug, Default, Deserialize)]
pub struct VoteQuery {
    pub org: Option<String>,
    pub filters: Option<String>,
}

impl VoteQuery {
    /// Unknown or blank organizations mean "all".
    pub fn organization(&self) -> Option<Organization> {
        self.org
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .and_then(|o| o.parse().ok())
    }

    pub fn show_filters(&self) -> bool {
        self.filters.as_deref() == Some("1") || self.organization().is_some()
    }
}

fn back_to_list(form: &CsrfOnly) -> HttpResponse {
    see_other(safe_return_path(form.return_to.as_deref(), "/vote"))
}

/// GET /vote
/// Lists ideas (optionally for one organization) with this browser's votes marked.
pub async fn list(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    query: web::Query<VoteQuery>,
) -> Result<HttpResponse, AppError> {
    let selected_org = query.organization();
    let fetched = match selected_org {
        Some(org) => store.fetch_ideas_by_organization(org).await,
        None => store.fetch_ideas().await,
    };
    let (ideas, load_error) = match fetched {
        Ok(ideas) => (ideas, false),
        Err(e) => {
            log::error!("Error loading ideas: {e}");
            (Vec::new(), true)
        }
    };

    let coordinator = VoteCoordinator::new(store.get_ref(), &session);
    let mut board = coordinator.board(ideas);
    coordinator.hydrate(&mut board).await;

    let voted = board.voted().clone();
    let cards = board
        .into_ideas()
        .into_iter()
        .map(|idea| IdeaCard {
            has_voted: voted.contains(&idea.id),
            idea,
        })
        .collect();

    let ctx = PageContext::build(&session, "/vote");
    let tmpl = VoteTemplate {
        ctx,
        cards,
        organizations: OrgOption::list(selected_org.map(|o| o.as_str())),
        selected_org,
        show_filters: query.show_filters(),
        load_error,
    };
    render(tmpl)
}

/// POST /vote/{id}
/// Optimistic vote; a rejected vote leaves the voted set untouched and shows an error.
pub async fn vote(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let idea_id = path.into_inner();

    let coordinator = VoteCoordinator::new(store.get_ref(), &session);
    let mut board = coordinator.board(Vec::new());
    match coordinator.vote(&mut board, &idea_id).await {
        Ok(VoteOutcome::Recorded { .. }) | Ok(VoteOutcome::AlreadyVoted) => {}
        Err(StoreError::DuplicateVote) => {
            set_error(&session, "You have already voted for this idea.");
        }
        Err(StoreError::Remote(_)) => {
            set_error(&session, "Failed to register vote. Please try again.");
        }
    }
    Ok(back_to_list(&form))
}

#[derive(Deserialize)]
pub struct CommentPost {
    #[serde(flatten)]
    pub comment: CommentForm,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// POST /vote/{id}/comments
pub async fn comment(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CommentPost>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.comment.csrf_token)?;
    let idea_id = path.into_inner();
    let target = safe_return_path(form.return_to.as_deref(), "/vote");

    let new_comment = match form.comment.validate() {
        Ok(c) => c,
        Err(ValidationError(errors)) => {
            set_error(&session, &errors.join(". "));
            return Ok(see_other(target));
        }
    };

    match store.add_comment(&idea_id, &new_comment.text, &new_comment.author).await {
        Ok(c) => log::info!("Comment {} added to idea {idea_id}", c.id),
        Err(e) => {
            log::error!("Error adding comment: {e}");
            set_error(&session, "Failed to add comment. Please try again.");
        }
    }
    Ok(see_other(target))
}

/// POST /vote/{id}/delete
pub async fn delete(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let idea_id = path.into_inner();

    match store.delete_idea(&idea_id).await {
        Ok(()) => {
            log::info!("Idea {idea_id} deleted");
            set_flash(&session, "Idea deleted");
        }
        Err(e) => {
            log::error!("Error deleting idea: {e}");
            set_error(&session, "Failed to delete idea. Please try again.");
        }
    }
    Ok(back_to_list(&form))
}
