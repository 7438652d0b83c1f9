use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    diets::{
        dto::{DietDetails, DietPayload, DietSummary},
        repo,
        services::{self, DietError},
    },
    pagination::{Page, PageParams},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/diet", get(list_diets))
        .route("/diet/:id", get(get_diet))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/diet", post(create_diet))
        .route("/diet/:id", put(update_diet).delete(delete_diet))
}

fn reject(e: DietError) -> (StatusCode, String) {
    match e {
        DietError::Validation(v) => {
            warn!(problems = v.problems.len(), "diet rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, v.to_string())
        }
        DietError::NotFound => (StatusCode::NOT_FOUND, "Diet not found".into()),
        DietError::Db(e) => {
            error!(error = %e, "diet persistence failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_diet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<DietPayload>,
) -> Result<(StatusCode, Json<DietDetails>), (StatusCode, String)> {
    let details = services::create_diet(&state.db, user_id, &payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(details)))
}

#[instrument(skip(state, payload))]
pub async fn update_diet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DietPayload>,
) -> Result<Json<DietDetails>, (StatusCode, String)> {
    let details = services::update_diet(&state.db, user_id, id, &payload)
        .await
        .map_err(reject)?;
    Ok(Json(details))
}

#[instrument(skip(state))]
pub async fn get_diet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DietDetails>, (StatusCode, String)> {
    let details = services::load_details(&state.db, user_id, id)
        .await
        .map_err(reject)?
        .ok_or((StatusCode::NOT_FOUND, "Diet not found".to_string()))?;
    Ok(Json(details))
}

#[instrument(skip(state))]
pub async fn list_diets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<DietSummary>>, (StatusCode, String)> {
    let internal = |e: anyhow::Error| {
        error!(error = %e, "list diets failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    };
    let rows = repo::list_diets(&state.db, user_id, params.limit(), params.offset())
        .await
        .map_err(internal)?;
    let total = repo::count_diets(&state.db, user_id)
        .await
        .map_err(internal)?;

    let content = rows
        .into_iter()
        .map(|d| DietSummary {
            id: d.id,
            description: d.description,
            weight: d.weight,
            height: d.height,
            tdee: d.tdee,
            created_at: d.created_at,
        })
        .collect();
    Ok(Json(Page::new(content, &params, total)))
}

#[instrument(skip(state))]
pub async fn delete_diet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = repo::delete_diet(&state.db, user_id, id)
        .await
        .map_err(|e| {
            error!(error = %e, "delete diet failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    if deleted == 0 {
        return Err((StatusCode::NOT_FOUND, "Diet not found".into()));
    }
    info!(diet_id = %id, "diet deleted");
    Ok(StatusCode::NO_CONTENT)
}
