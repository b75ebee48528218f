// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::csrf;
use crate::flash::{Flash, take_flash};
use crate::models::Organization;
use crate::preferences;

mod api;
mod ideas;

pub use self::api::{
    ApiErrorResponse, HealthResponse, IdeasResponse, LogoResponse, VoteResponse,
};
pub use self::ideas::{
    IdeaCard, LeaderboardTemplate, OrgOption, RankedIdea, SubmitTemplate, VoteTemplate,
};

pub const APP_TITLE: &str = "Catalyst Group Ideaboard";

/// Navigation entry; `active` marks the current route.
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 3] = [
    ("/", "Submit Ideas"),
    ("/vote", "Vote"),
    ("/leaderboard", "Leaderboard"),
];

/// Common context shared by all pages.
/// Templates access these as `ctx.flash`, `ctx.dark_mode`, etc.
pub struct PageContext {
    pub app_title: &'static str,
    pub flash: Option<Flash>,
    pub csrf_token: String,
    pub dark_mode: bool,
    pub current_path: String,
    pub nav: Vec<NavLink>,
    pub member_orgs: Vec<Organization>,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Self {
        let nav = NAV
            .iter()
            .map(|&(href, label)| NavLink {
                href,
                label,
                active: href == current_path,
            })
            .collect();
        Self {
            app_title: APP_TITLE,
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            dark_mode: preferences::dark_mode(session),
            current_path: current_path.to_string(),
            nav,
            member_orgs: Organization::ALL
                .into_iter()
                .filter(|o| *o != Organization::CatalystGroup)
                .collect(),
        }
    }
}
