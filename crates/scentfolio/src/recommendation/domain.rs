use serde::{Deserialize, Serialize};

/// What one user likes, dislikes, and wears perfume for.
///
/// A note may legally show up in both lists; the engine applies the bonus
/// and the penalty independently rather than deduplicating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    #[serde(default)]
    pub preferred_notes: Vec<String>,
    #[serde(default)]
    pub disliked_notes: Vec<String>,
    #[serde(default)]
    pub usage_contexts: Vec<String>,
}

/// Engine input: one perfume with its note pyramid already flattened.
/// Callers concatenate top/middle/base tiers before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePerfume {
    pub notes: Vec<String>,
    pub family: String,
    pub mood: String,
    #[serde(default)]
    pub usage_contexts: Option<Vec<String>>,
}

/// Binary outcome of a scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Recommend,
    NotRecommend,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Recommend => "recommend",
            Verdict::NotRecommend => "not_recommend",
        }
    }
}

/// Identifier wrapper for persisted recommendation rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecommendationId(pub String);
