//! Optimistic voting with rollback.
//!
//! Each idea moves through `Unvoted -> Voting -> Voted` for one voter, and
//! back to `Unvoted` when the store rejects the vote. The check-and-mark
//! step ([`VoteBoard::begin_vote`]) is synchronous, so a second attempt on
//! the same board is refused before any request goes out. Across browsers
//! the store's uniqueness constraint decides.

use std::collections::HashSet;

use crate::errors::StoreError;
use crate::identity::get_or_create_voter_id;
use crate::local_store::LocalStore;
use crate::models::Idea;
use crate::preferences::{load_voted_ideas, save_voted_ideas};
use crate::repository::IdeaStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    Unvoted,
    Voting,
    Voted,
}

/// An applied optimistic update, to be confirmed or rolled back exactly once.
#[derive(Debug)]
#[must_use]
pub struct PendingVote {
    idea_id: String,
    counted: bool,
}

impl PendingVote {
    pub fn idea_id(&self) -> &str {
        &self.idea_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The store accepted the vote. `votes` is the displayed count, if the idea is on the board.
    Recorded { votes: Option<u32> },
    /// The voter had already voted; nothing was sent.
    AlreadyVoted,
}

/// Local view of the ideas and of which ones this voter has voted for.
#[derive(Debug, Clone, Default)]
pub struct VoteBoard {
    ideas: Vec<Idea>,
    voted: HashSet<String>,
    voting: HashSet<String>,
}

impl VoteBoard {
    pub fn new(ideas: Vec<Idea>, voted: HashSet<String>) -> Self {
        Self {
            ideas,
            voted,
            voting: HashSet::new(),
        }
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn into_ideas(self) -> Vec<Idea> {
        self.ideas
    }

    pub fn idea(&self, idea_id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == idea_id)
    }

    pub fn votes(&self, idea_id: &str) -> Option<u32> {
        self.idea(idea_id).map(|i| i.votes)
    }

    /// Ids marked voted, including votes still in flight.
    pub fn voted(&self) -> &HashSet<String> {
        &self.voted
    }

    pub fn has_voted(&self, idea_id: &str) -> bool {
        self.voted.contains(idea_id)
    }

    pub fn state(&self, idea_id: &str) -> VoteState {
        if self.voting.contains(idea_id) {
            VoteState::Voting
        } else if self.voted.contains(idea_id) {
            VoteState::Voted
        } else {
            VoteState::Unvoted
        }
    }

    /// Mark the idea voted and bump its count. `None` if it is already voted or in flight.
    pub fn begin_vote(&mut self, idea_id: &str) -> Option<PendingVote> {
        if self.state(idea_id) != VoteState::Unvoted {
            return None;
        }
        self.voted.insert(idea_id.to_string());
        self.voting.insert(idea_id.to_string());
        let counted = match self.ideas.iter_mut().find(|i| i.id == idea_id) {
            Some(idea) => {
                idea.votes += 1;
                true
            }
            None => false,
        };
        Some(PendingVote {
            idea_id: idea_id.to_string(),
            counted,
        })
    }

    pub fn confirm(&mut self, pending: PendingVote) {
        self.voting.remove(&pending.idea_id);
    }

    /// Undo exactly what `begin_vote` applied.
    pub fn rollback(&mut self, pending: PendingVote) {
        self.voting.remove(&pending.idea_id);
        self.voted.remove(&pending.idea_id);
        if pending.counted {
            if let Some(idea) = self.ideas.iter_mut().find(|i| i.id == pending.idea_id) {
                idea.votes = idea.votes.saturating_sub(1);
            }
        }
    }

    /// Replace the voted set with the store's view, keeping in-flight votes.
    pub fn hydrate(&mut self, confirmed: HashSet<String>) {
        let in_flight = self.voting.iter().cloned();
        self.voted = confirmed.into_iter().chain(in_flight).collect();
    }
}

/// Drives votes for one voter against a store, persisting the voted set locally.
pub struct VoteCoordinator<'a, L: LocalStore> {
    store: &'a dyn IdeaStore,
    local: &'a L,
    voter_id: String,
}

impl<'a, L: LocalStore> VoteCoordinator<'a, L> {
    pub fn new(store: &'a dyn IdeaStore, local: &'a L) -> Self {
        let voter_id = get_or_create_voter_id(local);
        Self {
            store,
            local,
            voter_id,
        }
    }

    pub fn voter_id(&self) -> &str {
        &self.voter_id
    }

    /// Board over `ideas` with the voted set last persisted locally.
    pub fn board(&self, ideas: Vec<Idea>) -> VoteBoard {
        VoteBoard::new(ideas, load_voted_ideas(self.local))
    }

    /// Refresh the voted set from the store. Failure is logged and otherwise ignored.
    pub async fn hydrate(&self, board: &mut VoteBoard) {
        match self.store.fetch_voted_ideas(&self.voter_id).await {
            Ok(confirmed) => {
                board.hydrate(confirmed);
                save_voted_ideas(self.local, board.voted());
            }
            Err(e) => log::warn!("Error loading voted ideas: {e}"),
        }
    }

    /// Vote optimistically; on failure the board is restored and the error returned.
    pub async fn vote(&self, board: &mut VoteBoard, idea_id: &str) -> Result<VoteOutcome, StoreError> {
        let Some(pending) = board.begin_vote(idea_id) else {
            log::debug!("Voter {} already voted for {idea_id}", self.voter_id);
            return Ok(VoteOutcome::AlreadyVoted);
        };

        match self.store.vote_for_idea(idea_id, &self.voter_id).await {
            Ok(()) => {
                board.confirm(pending);
                save_voted_ideas(self.local, board.voted());
                log::info!("Vote recorded for idea {idea_id}");
                Ok(VoteOutcome::Recorded {
                    votes: board.votes(idea_id),
                })
            }
            Err(e) => {
                board.rollback(pending);
                log::error!("Error voting for idea {idea_id}: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organization;
    use chrono::{TimeZone, Utc};

    fn idea(id: &str, votes: u32, org: Organization) -> Idea {
        Idea {
            id: id.to_string(),
            title: format!("Idea {id}"),
            description: String::new(),
            author: "Asha".to_string(),
            organization: org,
            votes,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            comments: Vec::new(),
        }
    }

    fn board() -> VoteBoard {
        VoteBoard::new(
            vec![idea("I1", 3, Organization::Vrutti), idea("I2", 0, Organization::Swasti)],
            HashSet::new(),
        )
    }

    #[test]
    fn begin_vote_is_optimistic() {
        let mut b = board();
        let pending = b.begin_vote("I1").unwrap();
        assert_eq!(b.state("I1"), VoteState::Voting);
        assert_eq!(b.votes("I1"), Some(4));
        assert!(b.has_voted("I1"));
        b.confirm(pending);
        assert_eq!(b.state("I1"), VoteState::Voted);
        assert_eq!(b.votes("I1"), Some(4));
    }

    #[test]
    fn second_begin_is_refused_while_in_flight_and_after() {
        let mut b = board();
        let pending = b.begin_vote("I1").unwrap();
        assert!(b.begin_vote("I1").is_none());
        b.confirm(pending);
        assert!(b.begin_vote("I1").is_none());
        assert_eq!(b.votes("I1"), Some(4));
    }

    #[test]
    fn rollback_restores_count_and_state() {
        let mut b = board();
        let pending = b.begin_vote("I1").unwrap();
        b.rollback(pending);
        assert_eq!(b.state("I1"), VoteState::Unvoted);
        assert_eq!(b.votes("I1"), Some(3));
        assert!(!b.has_voted("I1"));
        assert!(b.begin_vote("I1").is_some());
    }

    #[test]
    fn vote_on_idea_missing_from_board_only_touches_voted_set() {
        let mut b = board();
        let pending = b.begin_vote("elsewhere").unwrap();
        assert!(b.has_voted("elsewhere"));
        b.rollback(pending);
        assert!(!b.has_voted("elsewhere"));
        assert_eq!(b.votes("I1"), Some(3));
    }

    #[test]
    fn hydrate_keeps_in_flight_votes() {
        let mut b = board();
        let pending = b.begin_vote("I2").unwrap();
        b.hydrate(["I1".to_string()].into_iter().collect());
        assert_eq!(b.state("I1"), VoteState::Voted);
        assert_eq!(b.state("I2"), VoteState::Voting);
        b.rollback(pending);
        assert_eq!(b.state("I2"), VoteState::Unvoted);
    }
}
