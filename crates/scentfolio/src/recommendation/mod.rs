//! Preference tracking and rule-based recommendation scoring.
//!
//! The verdict always comes from the deterministic rule engine in
//! [`engine`]; anything narrating a result downstream consumes the stored
//! score and reasons without re-judging them.

pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{CandidatePerfume, PreferenceProfile, RecommendationId, Verdict};
pub use engine::{RecommendationEngine, ScoringConfig, ScoringResult, RULE_VERSION};
pub use repository::{
    CollectionRepository, InputSnapshot, RecommendationRecord, RecommendationRepository,
    RecommendationView, RepositoryError,
};
pub use router::recommendation_router;
pub use service::{RecommendationService, ServiceError};
