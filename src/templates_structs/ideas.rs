use askama::Template;

use crate::models::{Idea, IdeaForm, Organization};

use super::PageContext;

/// Organization choice in a select or filter bar.
pub struct OrgOption {
    pub name: &'static str,
    pub selected: bool,
}

impl OrgOption {
    pub fn list(selected: Option<&str>) -> Vec<OrgOption> {
        Organization::ALL
            .iter()
            .map(|o| OrgOption {
                name: o.as_str(),
                selected: selected == Some(o.as_str()),
            })
            .collect()
    }

    /// `org=<name>` for filter links.
    pub fn query(&self) -> String {
        serde_urlencoded::to_string([("org", self.name)]).unwrap_or_default()
    }
}

/// One idea as rendered on the vote page.
pub struct IdeaCard {
    pub idea: Idea,
    pub has_voted: bool,
}

/// One leaderboard row; the top three show their rank.
pub struct RankedIdea {
    pub rank: usize,
    pub idea: Idea,
}

impl RankedIdea {
    pub fn podium(&self) -> bool {
        self.rank <= 3
    }
}

#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub ctx: PageContext,
    pub form: IdeaForm,
    pub organizations: Vec<OrgOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "vote.html")]
pub struct VoteTemplate {
    pub ctx: PageContext,
    pub cards: Vec<IdeaCard>,
    pub organizations: Vec<OrgOption>,
    pub selected_org: Option<Organization>,
    pub show_filters: bool,
    pub load_error: bool,
}

impl VoteTemplate {
    pub fn empty_message(&self) -> String {
        match self.selected_org {
            Some(org) => format!("There are no ideas for {org} yet. Be the first to submit one!"),
            None => "There are no ideas yet. Be the first to submit one!".to_string(),
        }
    }

    /// Query string that keeps the current filter state.
    pub fn filter_query(&self) -> String {
        filter_query(self.selected_org, self.show_filters)
    }
}

/// `?org=...&filters=1`, or empty when no filter is active.
pub fn filter_query(selected_org: Option<Organization>, show_filters: bool) -> String {
    let mut pairs = Vec::new();
    if let Some(org) = selected_org {
        pairs.push(("org", org.as_str()));
    }
    if show_filters {
        pairs.push(("filters", "1"));
    }
    match serde_urlencoded::to_string(&pairs) {
        Ok(query) if !query.is_empty() => format!("?{query}"),
        _ => String::new(),
    }
}

#[derive(Template)]
#[template(path = "leaderboard.html")]
pub struct LeaderboardTemplate {
    pub ctx: PageContext,
    pub entries: Vec<RankedIdea>,
    pub load_error: bool,
}
