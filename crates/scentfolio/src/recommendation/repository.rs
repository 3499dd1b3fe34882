use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{PreferenceProfile, RecommendationId, Verdict};
use crate::collection::{Perfume, PerfumeId, PerfumeRecord, UserId};

/// Immutable audit row produced by one scoring pass over one perfume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub id: RecommendationId,
    pub user_id: UserId,
    pub perfume_id: PerfumeId,
    pub verdict: Verdict,
    pub score: i32,
    pub reasons: Vec<String>,
    pub rule_version: String,
    pub input_snapshot: InputSnapshot,
    pub created_at: DateTime<Utc>,
}

impl RecommendationRecord {
    pub fn view(&self) -> RecommendationView {
        RecommendationView {
            id: self.id.clone(),
            perfume_id: self.perfume_id.clone(),
            verdict: self.verdict.label(),
            score: self.score,
            reasons: self.reasons.clone(),
            rule_version: self.rule_version.clone(),
            created_at: self.created_at,
        }
    }
}

/// Copy of both engine inputs taken at scoring time, kept so a stored result
/// can be audited or narrated later without re-reading live rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub preferences: PreferenceProfile,
    pub perfume: Perfume,
}

/// Storage abstraction for user-owned preference and perfume rows.
pub trait CollectionRepository: Send + Sync {
    fn upsert_preferences(
        &self,
        user: &UserId,
        profile: PreferenceProfile,
    ) -> Result<PreferenceProfile, RepositoryError>;
    fn preferences(&self, user: &UserId) -> Result<Option<PreferenceProfile>, RepositoryError>;
    fn insert_perfume(&self, record: PerfumeRecord) -> Result<PerfumeRecord, RepositoryError>;
    fn update_perfume(&self, record: PerfumeRecord) -> Result<(), RepositoryError>;
    fn delete_perfume(&self, user: &UserId, id: &PerfumeId) -> Result<(), RepositoryError>;
    fn fetch_perfume(
        &self,
        user: &UserId,
        id: &PerfumeId,
    ) -> Result<Option<PerfumeRecord>, RepositoryError>;
    fn perfumes_for_user(&self, user: &UserId) -> Result<Vec<PerfumeRecord>, RepositoryError>;
}

/// Append-only store for scoring results. Prior rows are never rewritten;
/// each generation run adds fresh history.
pub trait RecommendationRepository: Send + Sync {
    fn append(
        &self,
        record: RecommendationRecord,
    ) -> Result<RecommendationRecord, RepositoryError>;
    /// Newest stored result per perfume the user owns.
    fn latest_for_user(&self, user: &UserId)
        -> Result<Vec<RecommendationRecord>, RepositoryError>;
    /// Full history for one perfume, oldest first.
    fn history_for_perfume(
        &self,
        user: &UserId,
        perfume: &PerfumeId,
    ) -> Result<Vec<RecommendationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Wire representation of a stored result.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub id: RecommendationId,
    pub perfume_id: PerfumeId,
    pub verdict: &'static str,
    pub score: i32,
    pub reasons: Vec<String>,
    pub rule_version: String,
    pub created_at: DateTime<Utc>,
}
