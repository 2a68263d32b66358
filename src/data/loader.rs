use super::models::{LoadedMatch, MatchFile};
use crate::analysis::{ChampionAggregate, ChampionRoleTable};
use crate::error::AppError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path).map_err(|e| AppError::IoError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AppError::JsonError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

pub fn load_match(path: &Path) -> Result<LoadedMatch, AppError> {
    let loaded: LoadedMatch = read_json::<MatchFile>(path)?.into();

    if loaded.participants.is_empty() {
        return Err(AppError::NoParticipants(path.display().to_string()));
    }

    debug!(
        "loaded {} participants from {} (match {:?})",
        loaded.participants.len(),
        path.display(),
        loaded.match_id
    );
    Ok(loaded)
}

pub fn load_role_table(path: &Path) -> Result<ChampionRoleTable, AppError> {
    let table: ChampionRoleTable = read_json(path)?;
    debug!("loaded roles for {} champions from {}", table.len(), path.display());
    Ok(table)
}

pub fn load_aggregates(path: &Path) -> Result<Vec<ChampionAggregate>, AppError> {
    let aggregates: Vec<ChampionAggregate> = read_json(path)?;
    debug!("loaded {} champion aggregates from {}", aggregates.len(), path.display());
    Ok(aggregates)
}
