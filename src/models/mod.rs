pub mod idea;
pub mod organization;

pub use idea::{Comment, CommentForm, Idea, IdeaForm, NewComment, NewIdea};
pub use organization::Organization;
