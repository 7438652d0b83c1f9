use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::AuthUser,
    foods::{
        dto::{DeleteFoodRequest, FoodSortParams, NewFood},
        import::{self, ImportError},
        repo::{self, Food},
    },
    pagination::{Page, PageParams},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/food", get(list_food))
        .route("/food/all", get(list_all_food))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/food", post(create_food).delete(delete_food))
        .route("/food/import", post(import_food))
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024)) // 5MB catalog uploads
}

fn internal(e: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<NewFood>,
) -> Result<(StatusCode, Json<Food>), (StatusCode, String)> {
    if let Err(reason) = payload.validate() {
        warn!(%reason, "rejecting food item");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, reason));
    }

    let food = repo::create(&state.db, user_id, &payload)
        .await
        .map_err(|e| {
            error!(error = %e, "create food failed");
            internal(e)
        })?;

    info!(food_id = %food.id, description = %food.description, "food created");
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state))]
pub async fn list_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(page): Query<PageParams>,
    Query(sort): Query<FoodSortParams>,
) -> Result<Json<Page<Food>>, (StatusCode, String)> {
    let rows = repo::list(
        &state.db,
        user_id,
        sort.order_by,
        sort.order_direction,
        page.limit(),
        page.offset(),
    )
    .await
    .map_err(internal)?;
    let total = repo::count(&state.db, user_id).await.map_err(internal)?;

    Ok(Json(Page::new(rows, &page, total)))
}

#[instrument(skip(state))]
pub async fn list_all_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Food>>, (StatusCode, String)> {
    let rows = repo::list_all(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn delete_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<DeleteFoodRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if payload.ids.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "ids is required".into()));
    }
    let deleted = repo::delete_many(&state.db, user_id, &payload.ids)
        .await
        .map_err(internal)?;
    info!(requested = payload.ids.len(), deleted, "foods deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Pull the `file` field out of the upload. A broken multipart stream is
/// the client's error and is reported as such, not as a missing field.
async fn read_file_field(mut mp: Multipart) -> Result<Option<Vec<u8>>, String> {
    let mut data = None;
    loop {
        match mp.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                    data = Some(bytes.to_vec());
                }
            }
            Ok(None) => break,
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(data)
}

/// POST /food/import (multipart, field `file`: CSV catalog)
#[instrument(skip(state, mp))]
pub async fn import_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mp: Multipart,
) -> Result<Json<import::ImportSummary>, (StatusCode, String)> {
    let data = read_file_field(mp)
        .await
        .map_err(|reason| (StatusCode::BAD_REQUEST, reason))?;
    let Some(data) = data else {
        return Err((StatusCode::BAD_REQUEST, "file field is required".into()));
    };

    match import::import_csv(&state.db, user_id, &data).await {
        Ok(summary) => Ok(Json(summary)),
        Err(e @ (ImportError::Empty | ImportError::Malformed { .. } | ImportError::Invalid { .. })) => {
            warn!(error = %e, "rejecting catalog import");
            Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
        Err(ImportError::Db(e)) => {
            error!(error = %e, "catalog import failed");
            Err(internal(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::FromRequest, http::Request};

    const BOUNDARY: &str = "catalog-upload";

    async fn multipart_from(body: &str) -> Multipart {
        let req = Request::builder()
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body.to_string()))
            .unwrap();
        Multipart::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn read_file_field_returns_file_bytes() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"foods.csv\"\r\n\r\n\
             description,servingSize\r\n\
             --{BOUNDARY}--\r\n"
        );
        let mp = multipart_from(&body).await;
        let data = read_file_field(mp).await.unwrap();
        assert_eq!(data.as_deref(), Some(b"description,servingSize".as_slice()));
    }

    #[tokio::test]
    async fn read_file_field_without_file_part_yields_none() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"notes\"\r\n\r\n\
             hello\r\n\
             --{BOUNDARY}--\r\n"
        );
        let mp = multipart_from(&body).await;
        assert_eq!(read_file_field(mp).await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_file_field_surfaces_stream_errors() {
        // truncated upload: the closing boundary never arrives
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"foods.csv\"\r\n\r\n\
             description,serv"
        );
        let mp = multipart_from(&body).await;
        let reason = read_file_field(mp).await.unwrap_err();
        assert!(!reason.is_empty());
    }
}
