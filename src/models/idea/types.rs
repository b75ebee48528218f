use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::organization::Organization;

/// A submitted idea with its comments attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub organization: Organization,
    pub votes: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
}

impl Idea {
    pub fn created_label(&self) -> String {
        self.created_at.format("%d %b %Y").to_string()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// A comment on an idea. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub idea_id: Option<String>,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn created_label(&self) -> String {
        self.created_at.format("%d %b %Y %H:%M").to_string()
    }
}

/// Validated idea ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub author: String,
    pub organization: Organization,
}

/// Validated comment ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub text: String,
    pub author: String,
}

/// Raw submit form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Raw comment form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// PostgREST returns `null` for an empty embed in some configurations.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
