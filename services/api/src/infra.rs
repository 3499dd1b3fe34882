use metrics_exporter_prometheus::PrometheusHandle;
use scentfolio::collection::{PerfumeId, PerfumeRecord, UserId};
use scentfolio::recommendation::{
    CollectionRepository, PreferenceProfile, RecommendationRecord, RecommendationRepository,
    RepositoryError,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCollectionRepository {
    preferences: Arc<Mutex<HashMap<UserId, PreferenceProfile>>>,
    perfumes: Arc<Mutex<BTreeMap<String, PerfumeRecord>>>,
}

impl CollectionRepository for InMemoryCollectionRepository {
    fn upsert_preferences(
        &self,
        user: &UserId,
        profile: PreferenceProfile,
    ) -> Result<PreferenceProfile, RepositoryError> {
        let mut guard = self.preferences.lock().expect("repository mutex poisoned");
        guard.insert(user.clone(), profile.clone());
        Ok(profile)
    }

    fn preferences(&self, user: &UserId) -> Result<Option<PreferenceProfile>, RepositoryError> {
        let guard = self.preferences.lock().expect("repository mutex poisoned");
        Ok(guard.get(user).cloned())
    }

    fn insert_perfume(&self, record: PerfumeRecord) -> Result<PerfumeRecord, RepositoryError> {
        let mut guard = self.perfumes.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.0.clone(), record.clone());
        Ok(record)
    }

    fn update_perfume(&self, record: PerfumeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.perfumes.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id.0) {
            guard.insert(record.id.0.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete_perfume(&self, user: &UserId, id: &PerfumeId) -> Result<(), RepositoryError> {
        let mut guard = self.perfumes.lock().expect("repository mutex poisoned");
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
        let guard = self.perfumes.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(&id.0)
            .filter(|record| record.user_id == *user)
            .cloned())
    }

    fn perfumes_for_user(&self, user: &UserId) -> Result<Vec<PerfumeRecord>, RepositoryError> {
        let guard = self.perfumes.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.user_id == *user)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRecommendationRepository {
    rows: Arc<Mutex<Vec<RecommendationRecord>>>,
}

impl RecommendationRepository for InMemoryRecommendationRepository {
    fn append(
        &self,
        record: RecommendationRecord,
    ) -> Result<RecommendationRecord, RepositoryError> {
        let mut guard = self.rows.lock().expect("results mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn latest_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<RecommendationRecord>, RepositoryError> {
        let guard = self.rows.lock().expect("results mutex poisoned");
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
        let guard = self.rows.lock().expect("results mutex poisoned");
        Ok(guard
            .iter()
            .filter(|row| row.user_id == *user && row.perfume_id == *perfume)
            .cloned()
            .collect())
    }
}
