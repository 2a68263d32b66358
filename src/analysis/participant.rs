use serde::{Deserialize, Serialize};

/// Per-player challenge metrics from the match payload.
///
/// Every field is optional because the upstream API omits metrics it did not
/// compute for a game. The accessor methods apply the zero default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenges {
    #[serde(default)]
    pub kill_participation: Option<f64>,
    #[serde(default)]
    pub team_damage_percentage: Option<f64>,
    #[serde(default)]
    pub turret_takedowns: Option<u32>,
    #[serde(default)]
    pub dragon_takedowns: Option<u32>,
    #[serde(default)]
    pub baron_takedowns: Option<u32>,
    #[serde(default)]
    pub damage_taken_on_team_percentage: Option<f64>,
    #[serde(default)]
    pub vision_score_per_minute: Option<f64>,
}

impl Challenges {
    pub fn kill_participation(&self) -> f64 {
        self.kill_participation.unwrap_or(0.0)
    }

    pub fn team_damage_percentage(&self) -> f64 {
        self.team_damage_percentage.unwrap_or(0.0)
    }

    /// Turrets, dragons and barons taken, summed in `f64`.
    pub fn objective_takedowns(&self) -> f64 {
        [self.turret_takedowns, self.dragon_takedowns, self.baron_takedowns]
            .iter()
            .map(|count| count.unwrap_or(0) as f64)
            .sum()
    }

    pub fn damage_taken_on_team_percentage(&self) -> f64 {
        self.damage_taken_on_team_percentage.unwrap_or(0.0)
    }

    pub fn vision_score_per_minute(&self) -> f64 {
        self.vision_score_per_minute.unwrap_or(0.0)
    }
}

/// One player's combat record for one match.
///
/// Field names follow the match-v5 participant payload, so a participant
/// list can be deserialized straight out of a match document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(alias = "puuid")]
    pub identity: String,
    #[serde(default)]
    pub team_id: i32,
    #[serde(default)]
    pub champion_id: i32,
    #[serde(default, alias = "summoner1Id")]
    pub spell1_id: i32,
    #[serde(default, alias = "summoner2Id")]
    pub spell2_id: i32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub challenges: Option<Challenges>,
    #[serde(default)]
    pub win: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riot_id_game_name: Option<String>,
}

impl Participant {
    pub fn new(identity: impl Into<String>, team_id: i32, champion_id: i32) -> Self {
        Participant {
            identity: identity.into(),
            team_id,
            champion_id,
            spell1_id: 0,
            spell2_id: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            challenges: None,
            win: false,
            champion_name: None,
            riot_id_game_name: None,
        }
    }

    pub fn has_spell(&self, spell_id: i32) -> bool {
        self.spell1_id == spell_id || self.spell2_id == spell_id
    }

    /// `(kills + assists) / max(deaths, 1)`
    pub fn kda(&self) -> f64 {
        (self.kills as f64 + self.assists as f64) / self.deaths.max(1) as f64
    }

    /// Challenge metrics, or an all-empty record when the payload had none.
    pub fn challenges(&self) -> Challenges {
        self.challenges.clone().unwrap_or_default()
    }

    /// Name used when rendering: the riot id, falling back to the raw key.
    pub fn display_name(&self) -> &str {
        self.riot_id_game_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.identity)
    }

    pub fn champion_label(&self) -> String {
        match &self.champion_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("#{}", self.champion_id),
        }
    }
}
