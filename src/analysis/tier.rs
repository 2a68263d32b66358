use crate::config::DEFAULT_MIN_GAMES;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Competitive tier, `Z` strongest. `Ord` follows strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    C,
    B,
    A,
    S,
    Z,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Z => "Z",
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Z" => Ok(Tier::Z),
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            _ => Err(AppError::InvalidTier(s.to_string())),
        }
    }
}

/// Aggregate statistics for one champion over the caller's sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionAggregate {
    pub champion_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_name: Option<String>,
    /// Percentage, 0-100.
    pub winrate: f64,
    /// Percentage of games the champion was picked in.
    pub pickrate: f64,
    pub games: u32,
}

impl ChampionAggregate {
    pub fn label(&self) -> String {
        match &self.champion_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("#{}", self.champion_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierPolicy {
    /// Below this sample size every champion is `C`.
    pub min_games: u32,
    pub winrate_baseline: f64,
    pub winrate_weight: f64,
    pub pickrate_weight: f64,
    /// Upper bound on the pickrate contribution.
    pub pickrate_cap: f64,
    pub z_above: f64,
    pub s_above: f64,
    pub a_above: f64,
    pub b_above: f64,
}

impl Default for TierPolicy {
    fn default() -> Self {
        TierPolicy {
            min_games: DEFAULT_MIN_GAMES,
            winrate_baseline: 50.0,
            winrate_weight: 1.5,
            pickrate_weight: 2.0,
            pickrate_cap: 10.0,
            z_above: 12.0,
            s_above: 6.0,
            a_above: 0.0,
            b_above: -6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierEntry {
    pub champion_id: i32,
    pub champion: String,
    pub tier: Tier,
    pub score: f64,
    pub winrate: f64,
    pub pickrate: f64,
    pub games: u32,
}

pub struct TierClassifier {
    policy: TierPolicy,
}

impl TierClassifier {
    pub fn new(policy: TierPolicy) -> Self {
        TierClassifier { policy }
    }

    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Meta strength before thresholding:
    /// `(winrate - 50) * 1.5 + min(pickrate * 2, 10)` with the default policy.
    pub fn strength(&self, winrate: f64, pickrate: f64) -> f64 {
        let p = &self.policy;
        (winrate - p.winrate_baseline) * p.winrate_weight + (pickrate * p.pickrate_weight).min(p.pickrate_cap)
    }

    pub fn classify(&self, winrate: f64, pickrate: f64, games: u32) -> Tier {
        if games < self.policy.min_games {
            return Tier::C;
        }
        self.tier_for_strength(self.strength(winrate, pickrate))
    }

    fn tier_for_strength(&self, score: f64) -> Tier {
        let p = &self.policy;
        if score > p.z_above {
            Tier::Z
        } else if score > p.s_above {
            Tier::S
        } else if score > p.a_above {
            Tier::A
        } else if score > p.b_above {
            Tier::B
        } else {
            Tier::C
        }
    }

    pub fn classify_aggregate(&self, aggregate: &ChampionAggregate) -> TierEntry {
        TierEntry {
            champion_id: aggregate.champion_id,
            champion: aggregate.label(),
            tier: self.classify(aggregate.winrate, aggregate.pickrate, aggregate.games),
            score: self.strength(aggregate.winrate, aggregate.pickrate),
            winrate: aggregate.winrate,
            pickrate: aggregate.pickrate,
            games: aggregate.games,
        }
    }

    /// Classifies a batch, strongest tier first, then by score, then by champion id.
    pub fn tier_list(&self, aggregates: &[ChampionAggregate]) -> Vec<TierEntry> {
        let mut entries: Vec<TierEntry> = aggregates.iter().map(|a| self.classify_aggregate(a)).collect();

        entries.sort_by(|a, b| {
            b.tier
                .cmp(&a.tier)
                .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
                .then_with(|| a.champion_id.cmp(&b.champion_id))
        });

        entries
    }
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self::new(TierPolicy::default())
    }
}

/// Classifies with the default policy.
pub fn classify(winrate: f64, pickrate: f64, games: u32) -> Tier {
    TierClassifier::default().classify(winrate, pickrate, games)
}
