mod config;
mod rules;
mod taxonomy;

pub use config::ScoringConfig;

use serde::{Deserialize, Serialize};

use super::domain::{CandidatePerfume, PreferenceProfile, Verdict};

/// Ruleset tag recorded with every persisted result.
pub const RULE_VERSION: &str = "v1";

/// Stateless scorer applying the weighted ruleset to one candidate at a time.
pub struct RecommendationEngine {
    config: ScoringConfig,
}

impl RecommendationEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Scores one candidate against one profile.
    ///
    /// Pure and total: no I/O, no failure paths, and identical inputs always
    /// produce identical output. Empty profiles or note lists are valid and
    /// score zero with only the summary reason.
    pub fn score(&self, profile: &PreferenceProfile, candidate: &CandidatePerfume) -> ScoringResult {
        let (score, mut reasons) = rules::apply_rules(profile, candidate, &self.config);

        // Threshold is inclusive on the recommend side.
        let verdict = if score >= self.config.recommend_threshold {
            Verdict::Recommend
        } else {
            Verdict::NotRecommend
        };

        let summary = match verdict {
            Verdict::Recommend => format!("Total score {score}: recommended"),
            Verdict::NotRecommend => format!("Total score {score}: not recommended"),
        };
        reasons.insert(0, summary);

        ScoringResult {
            verdict,
            score,
            reasons,
        }
    }
}

/// Scoring output: the verdict, the composite score, and the reason trail
/// with the summary line first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub verdict: Verdict,
    pub score: i32,
    pub reasons: Vec<String>,
}
