mod forms;
pub mod types;

pub use types::*;
