//! Axum route handlers for the insight API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::{debug, info};

use crate::cache::cache_key;
use crate::errors::AppError;
use crate::generation::generator::InsightRequest;
use crate::generation::scoring::personalization_score;
use crate::models::insight::{BirthRequest, InsightResponse, ZodiacResponse};
use crate::profiles::user_id;
use crate::state::AppState;
use crate::zodiac::{classify, sign_for_date};

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /predict
///
/// Generates the daily insight for the birth details in the JSON body.
pub async fn handle_predict(
    State(state): State<AppState>,
    payload: Result<Json<BirthRequest>, JsonRejection>,
) -> Result<Json<InsightResponse>, AppError> {
    let Json(request) = payload.map_err(|r| AppError::UnprocessableEntity(r.body_text()))?;
    Ok(Json(produce_insight(&state, request).await?))
}

/// GET /insight?name=&birth_date=&birth_time=&birth_place=&language=
///
/// Query-string twin of `/predict`.
pub async fn handle_insight_query(
    State(state): State<AppState>,
    query: Result<Query<BirthRequest>, QueryRejection>,
) -> Result<Json<InsightResponse>, AppError> {
    let Query(request) = query.map_err(|r| AppError::UnprocessableEntity(r.body_text()))?;
    Ok(Json(produce_insight(&state, request).await?))
}

/// GET /zodiac/:date
pub async fn handle_zodiac(Path(date): Path<String>) -> Result<Json<ZodiacResponse>, AppError> {
    let zodiac = classify(&date)?;
    Ok(Json(ZodiacResponse {
        birth_date: date,
        zodiac,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared flow
// ────────────────────────────────────────────────────────────────────────────

/// validate → classify → cache → profile context → generate → record → cache.
async fn produce_insight(
    state: &AppState,
    request: BirthRequest,
) -> Result<InsightResponse, AppError> {
    let birth = request.validate()?;
    let sign = sign_for_date(birth.date);
    let language = birth.language;
    info!("Insight requested for {} ({sign}, {language})", birth.name);

    let key = cache_key(&birth.name, &birth.birth_date, sign, language.as_str());
    if let Some(cache) = &state.cache {
        if let Some(insight) = cache.get(&key).await? {
            debug!("Cache hit for {}", birth.name);
            return Ok(InsightResponse {
                zodiac: sign,
                insight,
                language,
                name: Some(birth.name),
            });
        }
    }

    let profile_id = state
        .config
        .enable_user_profiles
        .then(|| user_id(&birth.name, &birth.birth_date));

    let user_context = match &profile_id {
        Some(id) => {
            state.profiles.get_or_create(id, &birth.name).await;
            state.profiles.personalization_context(id).await
        }
        None => None,
    };

    let outcome = state
        .generator
        .generate_insight(InsightRequest {
            name: &birth.name,
            sign,
            birth_place: Some(&birth.birth_place),
            language,
            user_context: user_context.as_ref(),
        })
        .await?;

    if let Some(id) = &profile_id {
        state
            .profiles
            .record_request(id, sign, &outcome.text, language.as_str())
            .await;
    }

    if let Some(cache) = &state.cache {
        cache.put(&key, &outcome.text).await?;
    }

    info!(
        "Insight for {} served by {} (attempts: {}, personalization {:.2})",
        birth.name,
        outcome.provider,
        outcome.attempts.join(", "),
        personalization_score(&birth.name)
    );

    Ok(InsightResponse {
        zodiac: sign,
        insight: outcome.text,
        language,
        name: Some(birth.name),
    })
}
