use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::gateway::{GatewayError, Query, RestGateway};
use crate::models::{Comment, Idea, NewIdea, Organization};

use super::IdeaStore;

const IDEAS: &str = "ideas";
const COMMENTS: &str = "comments";
const IDEA_VOTES: &str = "idea_votes";
const INCREMENT_VOTES: &str = "increment_votes";
const IDEA_WITH_COMMENTS: &str = "*,comments(*)";

#[derive(Serialize)]
struct IdeaRow<'a> {
    title: &'a str,
    description: &'a str,
    author: &'a str,
    organization: Organization,
    votes: u32,
}

#[derive(Serialize)]
struct VoteRow<'a> {
    idea_id: &'a str,
    voter_id: &'a str,
}

#[derive(Serialize)]
struct IncrementArgs<'a> {
    idea_id: &'a str,
}

#[derive(Deserialize)]
struct VotedRow {
    idea_id: String,
}

/// Idea store backed by the hosted PostgREST service.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    gateway: RestGateway,
}

impl SupabaseStore {
    pub fn new(gateway: RestGateway) -> Self {
        Self { gateway }
    }

    async fn select_ideas(&self, query: Query, context: &str) -> Result<Vec<Idea>, StoreError> {
        self.gateway
            .select::<Idea>(IDEAS, &query)
            .await
            .map_err(|e| {
                log::error!("Error fetching {context}: {e}");
                StoreError::from(e)
            })
    }
}

#[async_trait]
impl IdeaStore for SupabaseStore {
    fn backend_tag(&self) -> &'static str {
        "supabase"
    }

    async fn fetch_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        let query = Query::new()
            .select(IDEA_WITH_COMMENTS)
            .order("created_at", false);
        self.select_ideas(query, "ideas").await
    }

    async fn fetch_ideas_by_organization(&self, org: Organization) -> Result<Vec<Idea>, StoreError> {
        let query = Query::new()
            .select(IDEA_WITH_COMMENTS)
            .eq("organization", org.as_str())
            .order("created_at", false);
        self.select_ideas(query, &format!("ideas for {org}")).await
    }

    async fn fetch_top_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        let query = Query::new()
            .select(IDEA_WITH_COMMENTS)
            .order("votes", false);
        self.select_ideas(query, "top ideas").await
    }

    async fn submit_idea(&self, idea: &NewIdea) -> Result<Idea, StoreError> {
        let row = IdeaRow {
            title: &idea.title,
            description: &idea.description,
            author: &idea.author,
            organization: idea.organization,
            votes: 0,
        };
        let mut created: Vec<Idea> = self
            .gateway
            .insert(IDEAS, &[row])
            .await
            .map_err(|e| {
                log::error!("Error submitting idea: {e}");
                StoreError::from(e)
            })?;
        let mut idea = created
            .pop()
            .ok_or_else(|| StoreError::Remote("insert returned no row".to_string()))?;
        idea.comments.clear();
        Ok(idea)
    }

    async fn vote_for_idea(&self, idea_id: &str, voter_id: &str) -> Result<(), StoreError> {
        let vote = VoteRow { idea_id, voter_id };
        if let Err(e) = self.gateway.insert_minimal(IDEA_VOTES, &[vote]).await {
            if e.is_unique_violation() {
                log::warn!("Duplicate vote for idea {idea_id} by voter {voter_id}");
                return Err(StoreError::DuplicateVote);
            }
            log::error!("Error voting for idea {idea_id}: {e}");
            return Err(e.into());
        }

        // Counter bump is a second request; a failure here leaves the vote recorded.
        self.gateway
            .rpc(INCREMENT_VOTES, &IncrementArgs { idea_id })
            .await
            .map_err(|e| {
                log::error!("Vote for idea {idea_id} recorded but counter increment failed: {e}");
                StoreError::from(e)
            })
    }

    async fn add_comment(&self, idea_id: &str, text: &str, author: &str) -> Result<Comment, StoreError> {
        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            idea_id: Some(idea_id.to_string()),
            text: text.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
        };
        self.gateway
            .insert_minimal(COMMENTS, std::slice::from_ref(&comment))
            .await
            .map_err(|e| {
                log::error!("Error adding comment to idea {idea_id}: {e}");
                StoreError::from(e)
            })?;
        Ok(comment)
    }

    async fn delete_idea(&self, idea_id: &str) -> Result<(), StoreError> {
        self.gateway
            .delete(IDEAS, &Query::new().eq("id", idea_id))
            .await
            .map_err(|e| {
                log::error!("Error deleting idea {idea_id}: {e}");
                StoreError::from(e)
            })
    }

    async fn fetch_voted_ideas(&self, voter_id: &str) -> Result<HashSet<String>, StoreError> {
        let rows: Vec<VotedRow> = self
            .gateway
            .select(IDEA_VOTES, &Query::new().select("idea_id").eq("voter_id", voter_id))
            .await
            .map_err(|e| {
                log::error!("Error fetching voted ideas: {e}");
                StoreError::from(e)
            })?;
        Ok(rows.into_iter().map(|r| r.idea_id).collect())
    }

    async fn check_connection(&self) -> bool {
        let probe: Result<Vec<IgnoredAny>, GatewayError> = self
            .gateway
            .select(IDEAS, &Query::new().select("id").limit(1))
            .await;
        match probe {
            Ok(_) => true,
            Err(e) => {
                log::error!("Supabase connection error: {e}");
                false
            }
        }
    }
}
