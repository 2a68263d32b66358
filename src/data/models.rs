use crate::analysis::Participant;
use serde::{Deserialize, Serialize};

// Match V5 document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDto {
    #[serde(default)]
    pub metadata: Option<MatchMetadata>,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub game_duration: i64,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub queue_id: i32,
    #[serde(default)]
    pub game_version: String,
}

/// A match file holds either a full match document or a bare participant list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatchFile {
    Document(MatchDto),
    Participants(Vec<Participant>),
}

/// Match contents the analysis needs, independent of the file shape.
#[derive(Debug, Clone)]
pub struct LoadedMatch {
    pub match_id: Option<String>,
    pub game_duration: Option<i64>,
    pub queue_id: Option<i32>,
    pub game_version: Option<String>,
    pub participants: Vec<Participant>,
}

impl LoadedMatch {
    /// One-line header: id, queue, duration and patch, whichever are known.
    pub fn summary(&self, fallback_label: &str) -> String {
        let mut parts = vec![self.match_id.clone().unwrap_or_else(|| fallback_label.to_string())];
        if let Some(queue) = self.queue_id.filter(|q| *q > 0) {
            parts.push(format!("queue {}", queue));
        }
        if let Some(secs) = self.game_duration.filter(|d| *d > 0) {
            parts.push(format!("{}:{:02}", secs / 60, secs % 60));
        }
        if let Some(patch) = self.game_version.as_deref().and_then(patch_of) {
            parts.push(format!("patch {}", patch));
        }
        parts.join(" · ")
    }
}

/// "14.19.618.1234" -> "14.19"
fn patch_of(version: &str) -> Option<String> {
    let mut pieces = version.split('.');
    match (pieces.next(), pieces.next()) {
        (Some(major), Some(minor)) if !major.is_empty() && !minor.is_empty() => {
            Some(format!("{}.{}", major, minor))
        }
        _ => None,
    }
}

impl From<MatchFile> for LoadedMatch {
    fn from(file: MatchFile) -> Self {
        match file {
            MatchFile::Document(doc) => LoadedMatch {
                match_id: doc.metadata.map(|m| m.match_id),
                game_duration: Some(doc.info.game_duration),
                queue_id: Some(doc.info.queue_id),
                game_version: Some(doc.info.game_version),
                participants: doc.info.participants,
            },
            MatchFile::Participants(participants) => LoadedMatch {
                match_id: None,
                game_duration: None,
                queue_id: None,
                game_version: None,
                participants,
            },
        }
    }
}
