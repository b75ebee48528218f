//! Domain operations over the idea store.
//!
//! [`IdeaStore`] is the seam between the views/coordinator and persistence.
//! [`SupabaseStore`] talks to the hosted service; [`MemoryStore`] keeps
//! everything in process for demos and tests.

mod memory;
mod supabase;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::{Comment, Idea, NewIdea, Organization};

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

#[async_trait]
pub trait IdeaStore: Send + Sync + 'static {
    /// Short name for logs.
    fn backend_tag(&self) -> &'static str;

    /// All ideas, newest first, with comments attached.
    async fn fetch_ideas(&self) -> Result<Vec<Idea>, StoreError>;

    /// Ideas of one organization, newest first, with comments attached.
    async fn fetch_ideas_by_organization(&self, org: Organization) -> Result<Vec<Idea>, StoreError>;

    /// All ideas ordered by vote count, highest first.
    async fn fetch_top_ideas(&self) -> Result<Vec<Idea>, StoreError>;

    /// Insert a new idea with zero votes and return it as stored.
    async fn submit_idea(&self, idea: &NewIdea) -> Result<Idea, StoreError>;

    /// Record a vote, then bump the idea's counter. The two writes are not atomic.
    async fn vote_for_idea(&self, idea_id: &str, voter_id: &str) -> Result<(), StoreError>;

    async fn add_comment(&self, idea_id: &str, text: &str, author: &str) -> Result<Comment, StoreError>;

    async fn delete_idea(&self, idea_id: &str) -> Result<(), StoreError>;

    /// Ids of the ideas this voter already has a vote record for.
    async fn fetch_voted_ideas(&self, voter_id: &str) -> Result<HashSet<String>, StoreError>;

    /// Cheap one-row probe. Failures are logged and reported as `false`.
    async fn check_connection(&self) -> bool;
}

pub type SharedStore = Arc<dyn IdeaStore>;
