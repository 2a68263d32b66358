//! Match analytics: role inference, performance scoring and tier classification.
//!
//! Everything in here is a pure function of its inputs. Lookup tables and
//! tuning knobs are passed in explicitly.

pub mod normalize;
pub mod participant;
pub mod performance;
pub mod roles;
pub mod tier;

pub use participant::{Challenges, Participant};
pub use performance::{
    score_participants, FactorVector, PerformanceReport, PerformanceScorer, ScoreCard, ScoringWeights,
};
pub use roles::{
    infer_roles, AssignmentSource, ChampionRoleTable, InferenceConfig, Role, RoleAssignment,
    RoleInferenceEngine, RoleSlot, TeamRoles,
};
pub use tier::{classify, ChampionAggregate, Tier, TierClassifier, TierEntry, TierPolicy};
