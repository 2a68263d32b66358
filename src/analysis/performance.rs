use super::normalize::{finite_or_zero, min_max, round2};
use super::participant::Participant;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub const SCORE_FLOOR: f64 = 4.0;
pub const SCORE_CEILING: f64 = 10.0;

/// Weight of each factor in the raw performance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringWeights {
    pub kill_participation: f64,
    pub kda: f64,
    pub damage: f64,
    pub objectives: f64,
    pub vision: f64,
    pub tankiness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            kill_participation: 0.25,
            kda: 0.30,
            damage: 0.18,
            objectives: 0.12,
            vision: 0.08,
            tankiness: 0.07,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.kill_participation + self.kda + self.damage + self.objectives + self.vision + self.tankiness
    }
}

/// Raw (un-normalized) factors for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FactorVector {
    pub kda: f64,
    pub kill_participation: f64,
    pub damage_pct: f64,
    pub objectives: f64,
    pub tankiness: f64,
    pub vision: f64,
}

impl FactorVector {
    pub fn from_participant(participant: &Participant) -> Self {
        let challenges = participant.challenges();
        FactorVector {
            kda: participant.kda(),
            kill_participation: challenges.kill_participation(),
            damage_pct: challenges.team_damage_percentage(),
            objectives: challenges.objective_takedowns(),
            tankiness: challenges.damage_taken_on_team_percentage(),
            vision: challenges.vision_score_per_minute(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub identity: String,
    pub team_id: i32,
    pub win: bool,
    pub factors: FactorVector,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub scores: HashMap<String, f64>,
    pub mvp_win: Option<String>,
    pub mvp_lose: Option<String>,
    /// Per-participant breakdown in input order.
    #[serde(skip)]
    pub cards: Vec<ScoreCard>,
}

impl PerformanceReport {
    pub fn score_of(&self, identity: &str) -> Option<f64> {
        self.scores.get(identity).copied()
    }

    pub fn is_mvp(&self, identity: &str) -> bool {
        self.mvp_win.as_deref() == Some(identity) || self.mvp_lose.as_deref() == Some(identity)
    }
}

pub struct PerformanceScorer {
    weights: ScoringWeights,
}

impl PerformanceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        PerformanceScorer { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Scores every participant on a 4-10 scale and picks an MVP per side.
    ///
    /// Every factor except kill participation is min-max normalized across
    /// the whole participant list, weighted, and the weighted sums are
    /// normalized again before rescaling into the display range.
    pub fn score(&self, participants: &[Participant]) -> PerformanceReport {
        if participants.is_empty() {
            return PerformanceReport::default();
        }

        let factors: Vec<FactorVector> = participants.iter().map(FactorVector::from_participant).collect();

        let column = |pick: fn(&FactorVector) -> f64| -> Vec<f64> {
            min_max(&factors.iter().map(pick).collect::<Vec<_>>())
        };
        let kda = column(|f| f.kda);
        let damage = column(|f| f.damage_pct);
        let objectives = column(|f| f.objectives);
        let tankiness = column(|f| f.tankiness);
        let vision = column(|f| f.vision);

        let w = &self.weights;
        let raw: Vec<f64> = factors
            .iter()
            .enumerate()
            .map(|(i, f)| {
                finite_or_zero(f.kill_participation) * w.kill_participation
                    + kda[i] * w.kda
                    + damage[i] * w.damage
                    + objectives[i] * w.objectives
                    + vision[i] * w.vision
                    + tankiness[i] * w.tankiness
            })
            .collect();

        let cards: Vec<ScoreCard> = min_max(&raw)
            .into_iter()
            .zip(participants.iter().zip(factors))
            .map(|(normalized, (participant, factors))| ScoreCard {
                identity: participant.identity.clone(),
                team_id: participant.team_id,
                win: participant.win,
                factors,
                score: round2(SCORE_FLOOR + normalized * (SCORE_CEILING - SCORE_FLOOR)),
            })
            .collect();

        let winning_team = participants.iter().find(|p| p.win).map(|p| p.team_id);
        let losing_team = participants
            .iter()
            .find(|p| Some(p.team_id) != winning_team)
            .map(|p| p.team_id);

        let mvp_win = winning_team.and_then(|team| side_mvp(&cards, team));
        let mvp_lose = losing_team.and_then(|team| side_mvp(&cards, team));

        debug!(
            "scored {} participants, mvp win: {:?}, mvp lose: {:?}",
            cards.len(),
            mvp_win,
            mvp_lose
        );

        PerformanceReport {
            scores: cards.iter().map(|c| (c.identity.clone(), c.score)).collect(),
            mvp_win,
            mvp_lose,
            cards,
        }
    }
}

impl Default for PerformanceScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

/// Strictly highest score on the team; the first one seen keeps a tie.
fn side_mvp(cards: &[ScoreCard], team_id: i32) -> Option<String> {
    let mut best: Option<&ScoreCard> = None;
    for card in cards.iter().filter(|c| c.team_id == team_id) {
        match best {
            Some(b) if card.score <= b.score => {}
            _ => best = Some(card),
        }
    }
    best.map(|card| card.identity.clone())
}

/// Scores with the default weights.
pub fn score_participants(participants: &[Participant]) -> PerformanceReport {
    PerformanceScorer::default().score(participants)
}
