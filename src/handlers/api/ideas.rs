use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::coordinator::VoteCoordinator;
use crate::errors::{AppError, StoreError};
use crate::handlers::vote_handlers::VoteQuery;
use crate::models::CommentForm;
use crate::repository::IdeaStore;
use crate::templates_structs::{ApiErrorResponse, IdeasResponse, VoteResponse};

/// GET /api/ideas - Ideas (optionally for one organization) plus this browser's votes
pub async fn list(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    query: web::Query<VoteQuery>,
) -> Result<HttpResponse, AppError> {
    let ideas = match query.organization() {
        Some(org) => store.fetch_ideas_by_organization(org).await?,
        None => store.fetch_ideas().await?,
    };

    let coordinator = VoteCoordinator::new(store.get_ref(), &session);
    let mut board = coordinator.board(ideas);
    coordinator.hydrate(&mut board).await;

    let mut voted: Vec<String> = board.voted().iter().cloned().collect();
    voted.sort();
    Ok(HttpResponse::Ok().json(IdeasResponse {
        ideas: board.into_ideas(),
        voted,
    }))
}

/// POST /api/ideas/{id}/vote - Optimistic vote, rolled back on failure
pub async fn vote(
    store: web::Data<dyn IdeaStore>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let idea_id = path.into_inner();
    let ideas = store.fetch_ideas().await?;

    let coordinator = VoteCoordinator::new(store.get_ref(), &session);
    let mut board = coordinator.board(ideas);

    match coordinator.vote(&mut board, &idea_id).await {
        Ok(outcome) => {
            let response = VoteResponse::from_outcome(&idea_id, &outcome, board.votes(&idea_id));
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            let body = ApiErrorResponse {
                error: match e {
                    StoreError::DuplicateVote => "You have already voted for this idea".to_string(),
                    StoreError::Remote(_) => "Failed to register vote. Please try again.".to_string(),
                },
                idea_id: Some(idea_id.clone()),
                votes: board.votes(&idea_id),
            };
            let response = match e {
                StoreError::DuplicateVote => HttpResponse::Conflict().json(body),
                StoreError::Remote(_) => HttpResponse::BadGateway().json(body),
            };
            Ok(response)
        }
    }
}

/// POST /api/ideas/{id}/comments - Add a comment, returns it as stored
pub async fn comment(
    store: web::Data<dyn IdeaStore>,
    path: web::Path<String>,
    body: web::Json<CommentForm>,
) -> Result<HttpResponse, AppError> {
    let idea_id = path.into_inner();
    let new_comment = match body.validate() {
        Ok(c) => c,
        Err(e) => return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::new(e.0.join("; ")))),
    };
    let created = store
        .add_comment(&idea_id, &new_comment.text, &new_comment.author)
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// DELETE /api/ideas/{id}
pub async fn delete(
    store: web::Data<dyn IdeaStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let idea_id = path.into_inner();
    store.delete_idea(&idea_id).await?;
    log::info!("Idea {idea_id} deleted via API");
    Ok(HttpResponse::NoContent().finish())
}
