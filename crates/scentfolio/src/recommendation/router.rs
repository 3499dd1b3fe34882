use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::PreferenceProfile;
use super::repository::{CollectionRepository, RecommendationRepository, RepositoryError};
use super::service::{RecommendationService, ServiceError};
use crate::collection::{Perfume, PerfumeId, UserId};

/// Router builder exposing HTTP endpoints for preferences, the collection,
/// and recommendation generation.
pub fn recommendation_router<C, R>(service: Arc<RecommendationService<C, R>>) -> Router
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/preferences",
            get(preferences_handler::<C, R>).put(save_preferences_handler::<C, R>),
        )
        .route(
            "/api/v1/perfumes",
            get(list_perfumes_handler::<C, R>).post(add_perfume_handler::<C, R>),
        )
        .route(
            "/api/v1/perfumes/import",
            post(import_collection_handler::<C, R>),
        )
        .route(
            "/api/v1/perfumes/:perfume_id",
            get(get_perfume_handler::<C, R>)
                .put(update_perfume_handler::<C, R>)
                .delete(delete_perfume_handler::<C, R>),
        )
        .route(
            "/api/v1/recommendations",
            get(latest_recommendations_handler::<C, R>),
        )
        .route(
            "/api/v1/recommendations/generate",
            post(generate_handler::<C, R>),
        )
        .route(
            "/api/v1/recommendations/:perfume_id/history",
            get(history_handler::<C, R>),
        )
        .with_state(service)
}

/// Identity is delegated upstream; the header stands in for an
/// already-authenticated session.
fn caller(headers: &HeaderMap) -> UserId {
    let user = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("demo-user");
    UserId(user.to_string())
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::MissingPreferences | ServiceError::EmptyCollection => StatusCode::NOT_FOUND,
        ServiceError::Import(_) => StatusCode::BAD_REQUEST,
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn save_preferences_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    axum::Json(profile): axum::Json<PreferenceProfile>,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.save_preferences(&caller(&headers), profile) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preferences_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.preferences(&caller(&headers)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_perfume_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    axum::Json(perfume): axum::Json<Perfume>,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.add_perfume(&caller(&headers), perfume) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_perfumes_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.perfumes(&caller(&headers)) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_perfume_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    Path(perfume_id): Path<String>,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    let id = PerfumeId(perfume_id);
    match service.perfume(&caller(&headers), &id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => error_response(ServiceError::Repository(RepositoryError::NotFound)),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_perfume_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    Path(perfume_id): Path<String>,
    axum::Json(perfume): axum::Json<Perfume>,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    let id = PerfumeId(perfume_id);
    match service.update_perfume(&caller(&headers), &id, perfume) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_perfume_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    Path(perfume_id): Path<String>,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    let id = PerfumeId(perfume_id);
    match service.remove_perfume(&caller(&headers), &id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_collection_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    body: String,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.import_collection(&caller(&headers), Cursor::new(body.into_bytes())) {
        Ok(records) => {
            let payload = json!({
                "count": records.len(),
                "perfumes": records,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn generate_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.generate(&caller(&headers)) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.view()).collect();
            let payload = json!({
                "count": views.len(),
                "results": views,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_recommendations_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    match service.latest(&caller(&headers)) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<C, R>(
    State(service): State<Arc<RecommendationService<C, R>>>,
    headers: HeaderMap,
    Path(perfume_id): Path<String>,
) -> Response
where
    C: CollectionRepository + 'static,
    R: RecommendationRepository + 'static,
{
    let id = PerfumeId(perfume_id);
    match service.history(&caller(&headers), &id) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}
