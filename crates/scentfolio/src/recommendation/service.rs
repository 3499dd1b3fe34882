use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{PreferenceProfile, RecommendationId};
use super::engine::{RecommendationEngine, ScoringConfig, RULE_VERSION};
use super::repository::{
    CollectionRepository, InputSnapshot, RecommendationRecord, RecommendationRepository,
    RepositoryError,
};
use crate::collection::import::{CollectionImportError, CsvCollectionImporter};
use crate::collection::{Perfume, PerfumeId, PerfumeRecord, UserId};

/// Service composing the collection store, the result history, and the
/// scoring engine.
pub struct RecommendationService<C, R> {
    collection: Arc<C>,
    results: Arc<R>,
    engine: Arc<RecommendationEngine>,
}

static PERFUME_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_perfume_id() -> PerfumeId {
    let id = PERFUME_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PerfumeId(format!("perfume-{id:06}"))
}

fn next_result_id() -> RecommendationId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecommendationId(format!("rec-{id:06}"))
}

impl<C, R> RecommendationService<C, R>
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    pub fn new(collection: Arc<C>, results: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            collection,
            results,
            engine: Arc::new(RecommendationEngine::new(config)),
        }
    }

    /// Replace the user's preference profile (last write wins).
    pub fn save_preferences(
        &self,
        user: &UserId,
        profile: PreferenceProfile,
    ) -> Result<PreferenceProfile, ServiceError> {
        Ok(self.collection.upsert_preferences(user, profile)?)
    }

    pub fn preferences(&self, user: &UserId) -> Result<Option<PreferenceProfile>, ServiceError> {
        Ok(self.collection.preferences(user)?)
    }

    pub fn add_perfume(
        &self,
        user: &UserId,
        perfume: Perfume,
    ) -> Result<PerfumeRecord, ServiceError> {
        let now = Utc::now();
        let record = PerfumeRecord {
            id: next_perfume_id(),
            user_id: user.clone(),
            perfume,
            created_at: now,
            updated_at: now,
        };
        Ok(self.collection.insert_perfume(record)?)
    }

    pub fn update_perfume(
        &self,
        user: &UserId,
        id: &PerfumeId,
        perfume: Perfume,
    ) -> Result<PerfumeRecord, ServiceError> {
        let mut record = self
            .collection
            .fetch_perfume(user, id)?
            .ok_or(RepositoryError::NotFound)?;
        record.perfume = perfume;
        record.updated_at = Utc::now();
        self.collection.update_perfume(record.clone())?;
        Ok(record)
    }

    pub fn remove_perfume(&self, user: &UserId, id: &PerfumeId) -> Result<(), ServiceError> {
        Ok(self.collection.delete_perfume(user, id)?)
    }

    pub fn perfume(
        &self,
        user: &UserId,
        id: &PerfumeId,
    ) -> Result<Option<PerfumeRecord>, ServiceError> {
        Ok(self.collection.fetch_perfume(user, id)?)
    }

    pub fn perfumes(&self, user: &UserId) -> Result<Vec<PerfumeRecord>, ServiceError> {
        Ok(self.collection.perfumes_for_user(user)?)
    }

    /// Add every perfume found in a CSV collection export.
    pub fn import_collection<D: Read>(
        &self,
        user: &UserId,
        reader: D,
    ) -> Result<Vec<PerfumeRecord>, ServiceError> {
        let perfumes = CsvCollectionImporter::from_reader(reader)?;
        let mut stored = Vec::with_capacity(perfumes.len());
        for perfume in perfumes {
            stored.push(self.add_perfume(user, perfume)?);
        }
        Ok(stored)
    }

    /// Score every perfume the user owns and append one history row each.
    ///
    /// Results from earlier runs stay in place; a generation run only adds
    /// rows, each tagged with the rule version and a snapshot of both inputs.
    pub fn generate(&self, user: &UserId) -> Result<Vec<RecommendationRecord>, ServiceError> {
        let profile = self
            .collection
            .preferences(user)?
            .ok_or(ServiceError::MissingPreferences)?;
        let perfumes = self.collection.perfumes_for_user(user)?;
        if perfumes.is_empty() {
            return Err(ServiceError::EmptyCollection);
        }

        let mut generated = Vec::with_capacity(perfumes.len());
        for record in perfumes {
            let result = self.engine.score(&profile, &record.perfume.candidate());
            let row = RecommendationRecord {
                id: next_result_id(),
                user_id: user.clone(),
                perfume_id: record.id.clone(),
                verdict: result.verdict,
                score: result.score,
                reasons: result.reasons,
                rule_version: RULE_VERSION.to_string(),
                input_snapshot: InputSnapshot {
                    preferences: profile.clone(),
                    perfume: record.perfume.clone(),
                },
                created_at: Utc::now(),
            };
            generated.push(self.results.append(row)?);
        }

        Ok(generated)
    }

    /// Newest stored result per perfume.
    pub fn latest(&self, user: &UserId) -> Result<Vec<RecommendationRecord>, ServiceError> {
        Ok(self.results.latest_for_user(user)?)
    }

    /// Full result history for one perfume, oldest first.
    pub fn history(
        &self,
        user: &UserId,
        perfume: &PerfumeId,
    ) -> Result<Vec<RecommendationRecord>, ServiceError> {
        Ok(self.results.history_for_perfume(user, perfume)?)
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("preferences not set for this user")]
    MissingPreferences,
    #[error("no perfumes in the collection")]
    EmptyCollection,
    #[error(transparent)]
    Import(#[from] CollectionImportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
