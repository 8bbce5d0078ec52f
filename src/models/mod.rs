// This file declares all model modules and re-exports their contents
// This allows other parts of the code to use `use crate::models::Runner`
// instead of `use crate::models::github::Runner`

pub mod github;

// Re-export all public items from the modules
pub use github::*;
