pub mod loader;
pub mod models;

pub use loader::{load_aggregates, load_match, load_role_table};
pub use models::{LoadedMatch, MatchDto, MatchFile, MatchInfo, MatchMetadata};
