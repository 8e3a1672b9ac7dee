pub mod footer;
pub mod stat_row;
pub mod token_detail;

pub use token_detail::{resolve_in_background, DetailState, Resolved, TokenDetail};
