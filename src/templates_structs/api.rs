use serde::Serialize;

use crate::coordinator::VoteOutcome;
use crate::models::Idea;

/// Ideas plus the ids this browser has voted for.
#[derive(Serialize, Debug, Clone)]
pub struct IdeasResponse {
    pub ideas: Vec<Idea>,
    pub voted: Vec<String>,
}

/// Result of a vote attempt after the optimistic update settled.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VoteResponse {
    pub idea_id: String,
    pub voted: bool,
    pub votes: Option<u32>,
    pub status: &'static str,
}

impl VoteResponse {
    pub fn from_outcome(idea_id: &str, outcome: &VoteOutcome, votes: Option<u32>) -> Self {
        let status = match outcome {
            VoteOutcome::Recorded { .. } => "recorded",
            VoteOutcome::AlreadyVoted => "already_voted",
        };
        Self {
            idea_id: idea_id.to_string(),
            voted: true,
            votes,
            status,
        }
    }
}

/// Error body for API endpoints. `votes` carries the rolled-back count when known.
#[derive(Serialize, Debug, Clone)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u32>,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            idea_id: None,
            votes: None,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct LogoResponse {
    pub url: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
}
