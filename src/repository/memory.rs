use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::errors::StoreError;
use crate::models::{Comment, Idea, NewIdea, Organization};

use super::IdeaStore;

#[derive(Default)]
struct Tables {
    ideas: Vec<Idea>,
    comments: Vec<Comment>,
    votes: HashSet<(String, String)>,
}

/// In-process idea store with the same uniqueness and cascade rules as the
/// hosted schema. Failures can be injected for tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    vote_failure: Mutex<Option<StoreError>>,
    unreachable: AtomicBool,
    vote_calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an idea as-is (id, votes and timestamp are kept).
    pub async fn insert_idea(&self, idea: Idea) {
        let mut tables = self.tables.lock().await;
        for comment in &idea.comments {
            tables.comments.push(Comment {
                idea_id: Some(idea.id.clone()),
                ..comment.clone()
            });
        }
        tables.ideas.push(Idea {
            comments: Vec::new(),
            ..idea
        });
    }

    /// Make every subsequent vote fail with `err` until cleared with `None`.
    pub async fn set_vote_failure(&self, err: Option<StoreError>) {
        *self.vote_failure.lock().await = err;
    }

    /// Make every operation fail as if the service were down.
    pub fn set_unreachable(&self, down: bool) {
        self.unreachable.store(down, Ordering::SeqCst);
    }

    pub fn vote_call_count(&self) -> u64 {
        self.vote_calls.load(Ordering::SeqCst)
    }

    pub async fn vote_record_count(&self) -> usize {
        self.tables.lock().await.votes.len()
    }

    fn ensure_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Remote("memory store marked unreachable".to_string()));
        }
        Ok(())
    }

    fn with_comments(tables: &Tables, idea: &Idea) -> Idea {
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.idea_id.as_deref() == Some(idea.id.as_str()))
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Idea {
            comments,
            ..idea.clone()
        }
    }

    /// Newest first; among equal timestamps the later insert wins.
    fn newest_first<'a>(tables: &Tables, ideas: impl DoubleEndedIterator<Item = &'a Idea>) -> Vec<Idea> {
        let mut out: Vec<Idea> = ideas.rev().map(|i| Self::with_comments(tables, i)).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

#[async_trait]
impl IdeaStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn fetch_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        self.ensure_reachable()?;
        let tables = self.tables.lock().await;
        Ok(Self::newest_first(&tables, tables.ideas.iter()))
    }

    async fn fetch_ideas_by_organization(&self, org: Organization) -> Result<Vec<Idea>, StoreError> {
        self.ensure_reachable()?;
        let tables = self.tables.lock().await;
        Ok(Self::newest_first(
            &tables,
            tables.ideas.iter().filter(|i| i.organization == org),
        ))
    }

    async fn fetch_top_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        self.ensure_reachable()?;
        let tables = self.tables.lock().await;
        let mut out = Self::newest_first(&tables, tables.ideas.iter());
        out.sort_by(|a, b| b.votes.cmp(&a.votes));
        Ok(out)
    }

    async fn submit_idea(&self, idea: &NewIdea) -> Result<Idea, StoreError> {
        self.ensure_reachable()?;
        let created = Idea {
            id: uuid::Uuid::new_v4().to_string(),
            title: idea.title.clone(),
            description: idea.description.clone(),
            author: idea.author.clone(),
            organization: idea.organization,
            votes: 0,
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        self.tables.lock().await.ideas.push(created.clone());
        Ok(created)
    }

    async fn vote_for_idea(&self, idea_id: &str, voter_id: &str) -> Result<(), StoreError> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_reachable()?;
        if let Some(err) = self.vote_failure.lock().await.clone() {
            return Err(err);
        }

        let mut tables = self.tables.lock().await;
        if !tables.ideas.iter().any(|i| i.id == idea_id) {
            return Err(StoreError::Remote(format!("idea {idea_id} does not exist")));
        }
        if !tables.votes.insert((idea_id.to_string(), voter_id.to_string())) {
            return Err(StoreError::DuplicateVote);
        }
        if let Some(idea) = tables.ideas.iter_mut().find(|i| i.id == idea_id) {
            idea.votes += 1;
        }
        Ok(())
    }

    async fn add_comment(&self, idea_id: &str, text: &str, author: &str) -> Result<Comment, StoreError> {
        self.ensure_reachable()?;
        let mut tables = self.tables.lock().await;
        if !tables.ideas.iter().any(|i| i.id == idea_id) {
            return Err(StoreError::Remote(format!("idea {idea_id} does not exist")));
        }
        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            idea_id: Some(idea_id.to_string()),
            text: text.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_idea(&self, idea_id: &str) -> Result<(), StoreError> {
        self.ensure_reachable()?;
        let mut tables = self.tables.lock().await;
        tables.ideas.retain(|i| i.id != idea_id);
        tables.comments.retain(|c| c.idea_id.as_deref() != Some(idea_id));
        tables.votes.retain(|(idea, _)| idea != idea_id);
        Ok(())
    }

    async fn fetch_voted_ideas(&self, voter_id: &str) -> Result<HashSet<String>, StoreError> {
        self.ensure_reachable()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .votes
            .iter()
            .filter(|(_, voter)| voter == voter_id)
            .map(|(idea, _)| idea.clone())
            .collect())
    }

    async fn check_connection(&self) -> bool {
        self.ensure_reachable().is_ok()
    }
}
