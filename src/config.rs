use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_JUNGLE_SPELL_ID: i32 = 11;
pub const DEFAULT_MIN_GAMES: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub role_table: Option<PathBuf>,
    pub jungle_spell_id: i32,
    pub min_games: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            role_table: None,
            jungle_spell_id: DEFAULT_JUNGLE_SPELL_ID,
            min_games: DEFAULT_MIN_GAMES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let role_table = env::var("MATCH_INSIGHT_ROLE_TABLE").ok().map(PathBuf::from);

        let jungle_spell_id = match env::var("MATCH_INSIGHT_JUNGLE_SPELL") {
            Ok(raw) => raw.trim().parse::<i32>().map_err(|_| {
                AppError::ConfigError(format!(
                    "MATCH_INSIGHT_JUNGLE_SPELL must be an integer, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_JUNGLE_SPELL_ID,
        };

        let min_games = match env::var("MATCH_INSIGHT_MIN_GAMES") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::ConfigError(format!(
                    "MATCH_INSIGHT_MIN_GAMES must be a non-negative integer, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_MIN_GAMES,
        };

        Ok(Config {
            role_table,
            jungle_spell_id,
            min_games,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_constants() {
        let config = Config::default();
        assert_eq!(config.jungle_spell_id, 11);
        assert_eq!(config.min_games, 100);
        assert!(config.role_table.is_none());
    }
}
