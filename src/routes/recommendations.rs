use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Catalog, RecommendationEngine};
use crate::error::EngineError;
use crate::models::{
    CategoriesResponse, ErrorResponse, HealthResponse, RecommendRequest, RecommendationEvent,
    RecommendationEventType, RecommendationsResponse, RecordEventRequest, RecordEventResponse,
    ScoreProfileRequest, SearchQuery, SearchResponse, SimilarQuery, SimilarResponse, TraitProfile,
};
use crate::services::{EventSink, InMemoryCatalog};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub catalog: Arc<InMemoryCatalog>,
    pub events: Arc<dyn EventSink>,
    pub max_limit: usize,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profile/score", web::post().to(score_profile))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/categories", web::post().to(recommend_by_category))
        .route("/recommendations/path", web::post().to(learning_path))
        .route("/courses", web::get().to(search_courses))
        .route("/courses/{id}/similar", web::get().to(similar_courses))
        .route("/events", web::post().to(record_event));
}

/// Map an engine error to its JSON response
pub fn error_response(err: &EngineError) -> HttpResponse {
    let status = match err {
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    ErrorResponse::new(err.kind(), err.to_string(), status).error_response()
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    ErrorResponse::bad_request("Validation failed", errors.to_string()).error_response()
}

/// Use the supplied profile, or score the supplied answers
fn resolve_profile(state: &AppState, req: &RecommendRequest) -> Result<TraitProfile, EngineError> {
    match &req.profile {
        Some(profile) => Ok(profile.clone()),
        None => state.engine.score_traits(&req.answers),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score a completed quiz
///
/// POST /api/v1/profile/score
///
/// Request body:
/// ```json
/// { "answers": [{ "questionId": "q1", "selectedOption": "A" }] }
/// ```
async fn score_profile(
    state: web::Data<AppState>,
    req: web::Json<ScoreProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.engine.score_traits(&req.answers) {
        Ok(profile) => {
            tracing::info!(
                "Scored quiz of {} answers: archetype {}",
                req.answers.len(),
                profile.archetype.code
            );
            HttpResponse::Ok().json(profile)
        }
        Err(e) => error_response(&e),
    }
}

/// Top recommendations
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "answers": [{ "questionId": "q1", "selectedOption": "B" }],
///   "preferences": { "level": "intermediate", "priceRange": { "min": 0, "max": 80 } },
///   "limit": 6
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let profile = match resolve_profile(&state, &req) {
        Ok(profile) => profile,
        Err(e) => return error_response(&e),
    };

    let limit = req.limit.map(|l| (l as usize).min(state.max_limit));

    match state
        .engine
        .recommend(&profile, req.preferences.as_ref(), state.catalog.as_ref(), limit)
    {
        Ok(recommendations) => {
            tracing::info!(
                "Returning {} recommendations for {} profile (from {} courses)",
                recommendations.len(),
                profile.archetype.code,
                state.catalog.len()
            );
            HttpResponse::Ok().json(RecommendationsResponse {
                profile,
                recommendations,
                catalog_size: state.catalog.len(),
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Recommendations grouped into primary, secondary and explore
///
/// POST /api/v1/recommendations/categories
async fn recommend_by_category(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let profile = match resolve_profile(&state, &req) {
        Ok(profile) => profile,
        Err(e) => return error_response(&e),
    };

    match state
        .engine
        .recommend_by_category(&profile, req.preferences.as_ref(), state.catalog.as_ref())
    {
        Ok(categories) => {
            tracing::debug!(
                "Categorized {} recommendations (primary={}, secondary={}, explore={})",
                categories.len(),
                categories.primary.len(),
                categories.secondary.len(),
                categories.explore.len()
            );
            HttpResponse::Ok().json(CategoriesResponse { profile, categories })
        }
        Err(e) => error_response(&e),
    }
}

/// Ordered learning path
///
/// POST /api/v1/recommendations/path
async fn learning_path(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let profile = match resolve_profile(&state, &req) {
        Ok(profile) => profile,
        Err(e) => return error_response(&e),
    };

    match state
        .engine
        .build_learning_path(&profile, req.preferences.as_ref(), state.catalog.as_ref())
    {
        Ok(recommendations) => HttpResponse::Ok().json(RecommendationsResponse {
            profile,
            recommendations,
            catalog_size: state.catalog.len(),
        }),
        Err(e) => error_response(&e),
    }
}

/// Catalog search
///
/// GET /api/v1/courses?q={query}
async fn search_courses(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let results = state.catalog.search(&query.q).into_iter().cloned().collect();

    HttpResponse::Ok().json(SearchResponse {
        query: query.q.clone(),
        results,
    })
}

/// Courses similar to a given course
///
/// GET /api/v1/courses/{id}/similar?limit={n}
async fn similar_courses(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SimilarQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let item_id = path.into_inner();
    let limit = query.limit.map(|l| l as usize);

    match state.engine.find_similar(&item_id, state.catalog.as_ref(), limit) {
        Ok(similar) => HttpResponse::Ok().json(SimilarResponse { item_id, similar }),
        Err(e) => {
            tracing::info!("Similar lookup failed for {}: {}", item_id, e);
            error_response(&e)
        }
    }
}

/// Record a learner interaction
///
/// POST /api/v1/events
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "itemId": "string",
///   "eventType": "viewed|clicked|enrolled|dismissed",
///   "score": 0.82
/// }
/// ```
async fn record_event(
    state: web::Data<AppState>,
    req: web::Json<RecordEventRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let event_type = match req.event_type.to_lowercase().as_str() {
        "viewed" => RecommendationEventType::Viewed,
        "clicked" => RecommendationEventType::Clicked,
        "enrolled" => RecommendationEventType::Enrolled,
        "dismissed" => RecommendationEventType::Dismissed,
        _ => {
            return ErrorResponse::bad_request(
                "Invalid event type",
                "Event type must be one of: viewed, clicked, enrolled, dismissed",
            )
            .error_response();
        }
    };

    if state.catalog.get_by_id(&req.item_id).is_none() {
        tracing::warn!("Event for unknown course {} from {}", req.item_id, req.user_id);
    }

    let event = RecommendationEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        user_id: req.user_id.clone(),
        item_id: req.item_id.clone(),
        event_type,
        score: req.score,
        created_at: chrono::Utc::now(),
    };

    state.events.record(&event);

    HttpResponse::Ok().json(RecordEventResponse {
        success: true,
        event_id: event.event_id,
    })
}
