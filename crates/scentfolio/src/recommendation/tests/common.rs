use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::collection::{Perfume, PerfumeId, PerfumeRecord, UserId};
use crate::recommendation::domain::{CandidatePerfume, PreferenceProfile};
use crate::recommendation::engine::{RecommendationEngine, ScoringConfig};
use crate::recommendation::repository::{
    CollectionRepository, RecommendationRecord, RecommendationRepository, RepositoryError,
};
use crate::recommendation::service::RecommendationService;

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(ScoringConfig::default())
}

pub(super) fn profile(
    preferred: &[&str],
    disliked: &[&str],
    contexts: &[&str],
) -> PreferenceProfile {
    PreferenceProfile {
        preferred_notes: strings(preferred),
        disliked_notes: strings(disliked),
        usage_contexts: strings(contexts),
    }
}

pub(super) fn candidate(
    notes: &[&str],
    family: &str,
    contexts: Option<&[&str]>,
) -> CandidatePerfume {
    CandidatePerfume {
        notes: strings(notes),
        family: family.to_string(),
        mood: "Versatile".to_string(),
        usage_contexts: contexts.map(strings),
    }
}

pub(super) fn perfume(
    name: &str,
    top: &[&str],
    middle: &[&str],
    base: &[&str],
    family: &str,
    contexts: Option<&[&str]>,
) -> Perfume {
    Perfume {
        name: name.to_string(),
        brand: "Maison Demo".to_string(),
        notes_top: strings(top),
        notes_middle: strings(middle),
        notes_base: strings(base),
        family: family.to_string(),
        mood: "Versatile".to_string(),
        usage_contexts: contexts.map(strings),
    }
}

pub(super) fn user(name: &str) -> UserId {
    UserId(name.to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemoryCollection {
    preferences: Arc<Mutex<HashMap<UserId, PreferenceProfile>>>,
    perfumes: Arc<Mutex<BTreeMap<String, PerfumeRecord>>>,
}

impl CollectionRepository for MemoryCollection {
    fn upsert_preferences(
        &self,
        user: &UserId,
        profile: PreferenceProfile,
    ) -> Result<PreferenceProfile, RepositoryError> {
        let mut guard = self.preferences.lock().expect("lock");
        guard.insert(user.clone(), profile.clone());
        Ok(profile)
    }

    fn preferences(&self, user: &UserId) -> Result<Option<PreferenceProfile>, RepositoryError> {
        let guard = self.preferences.lock().expect("lock");
        Ok(guard.get(user).cloned())
    }

    fn insert_perfume(&self, record: PerfumeRecord) -> Result<PerfumeRecord, RepositoryError> {
        let mut guard = self.perfumes.lock().expect("lock");
        if guard.contains_key(&record.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.0.clone(), record.clone());
        Ok(record)
    }

    fn update_perfume(&self, record: PerfumeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.perfumes.lock().expect("lock");
        if guard.contains_key(&record.id.0) {
            guard.insert(record.id.0.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete_perfume(&self, user: &UserId, id: &PerfumeId) -> Result<(), RepositoryError> {
        let mut guard = self.perfumes.lock().expect("lock");
        match guard.get(&id.0) {
            Some(record) if record.user_id == *user => {
                guard.remove(&id.0);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_perfume(
        &self,
        user: &UserId,
        id: &PerfumeId,
    ) -> Result<Option<PerfumeRecord>, RepositoryError> {
        let guard = self.perfumes.lock().expect("lock");
        Ok(guard
            .get(&id.0)
            .filter(|record| record.user_id == *user)
            .cloned())
    }

    fn perfumes_for_user(&self, user: &UserId) -> Result<Vec<PerfumeRecord>, RepositoryError> {
        let guard = self.perfumes.lock().expect("lock");
        Ok(guard
            .values()
            .filter(|record| record.user_id == *user)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryResults {
    rows: Arc<Mutex<Vec<RecommendationRecord>>>,
}

impl MemoryResults {
    pub(super) fn rows(&self) -> Vec<RecommendationRecord> {
        self.rows.lock().expect("lock").clone()
    }
}

impl RecommendationRepository for MemoryResults {
    fn append(
        &self,
        record: RecommendationRecord,
    ) -> Result<RecommendationRecord, RepositoryError> {
        let mut guard = self.rows.lock().expect("lock");
        guard.push(record.clone());
        Ok(record)
    }

    fn latest_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<RecommendationRecord>, RepositoryError> {
        let guard = self.rows.lock().expect("lock");
        let mut latest: BTreeMap<String, RecommendationRecord> = BTreeMap::new();
        for row in guard.iter().filter(|row| row.user_id == *user) {
            latest.insert(row.perfume_id.0.clone(), row.clone());
        }
        Ok(latest.into_values().collect())
    }

    fn history_for_perfume(
        &self,
        user: &UserId,
        perfume: &PerfumeId,
    ) -> Result<Vec<RecommendationRecord>, RepositoryError> {
        let guard = self.rows.lock().expect("lock");
        Ok(guard
            .iter()
            .filter(|row| row.user_id == *user && row.perfume_id == *perfume)
            .cloned()
            .collect())
    }
}

pub(super) fn build_service() -> (
    RecommendationService<MemoryCollection, MemoryResults>,
    Arc<MemoryCollection>,
    Arc<MemoryResults>,
) {
    let collection = Arc::new(MemoryCollection::default());
    let results = Arc::new(MemoryResults::default());
    let service = RecommendationService::new(
        collection.clone(),
        results.clone(),
        ScoringConfig::default(),
    );
    (service, collection, results)
}
