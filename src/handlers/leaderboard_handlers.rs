use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::errors::{AppError, render};
use crate::repository::IdeaStore;
use crate::templates_structs::{LeaderboardTemplate, PageContext, RankedIdea};

/// GET /leaderboard
/// Read-only ranking by vote count.
pub async fn index(
    store: web::Data<dyn IdeaStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let (ideas, load_error) = match store.fetch_top_ideas().await {
        Ok(ideas) => (ideas, false),
        Err(e) => {
            log::error!("Error fetching top ideas: {e}");
            (Vec::new(), true)
        }
    };

    let entries = ideas
        .into_iter()
        .enumerate()
        .map(|(i, idea)| RankedIdea { rank: i + 1, idea })
        .collect();

    let ctx = PageContext::build(&session, "/leaderboard");
    render(LeaderboardTemplate { ctx, entries, load_error })
}
