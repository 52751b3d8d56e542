use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde_json::{Map, Value, json};

use crate::models::{Client, ClientPatch, NewClient};

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::payload;
use super::validation::Validate;

pub const ROOT_MESSAGE: &str = "Client API operational";

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

/// GET /api/v1/client/
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    let mut conn = state.db.acquire().await?;
    let clients = state.clients.get_all(&mut conn).await?;
    Ok(Json(clients))
}

/// GET /api/v1/client/{id}
pub async fn get_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Client>> {
    let Path(id) = id?;
    let mut conn = state.db.acquire().await?;

    let client = state
        .clients
        .get_by_id(&mut conn, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(client))
}

/// POST /api/v1/client/
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<Client>> {
    let payload: NewClient = payload::from_json(payload)?;
    payload.validate()?;

    let mut conn = state.db.acquire().await?;
    let client = state.clients.create(&mut conn, payload).await?;

    tracing::info!(codcli = client.codcli, "client created");
    Ok(Json(client))
}

/// PATCH /api/v1/client/{id}
pub async fn patch_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<Client>> {
    let Path(id) = id?;
    let payload: ClientPatch = payload::from_json(payload)?;
    payload.validate()?;

    let mut conn = state.db.acquire().await?;
    if state.clients.get_by_id(&mut conn, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let client = state.clients.patch(&mut conn, id, payload).await?;

    tracing::info!(codcli = id, "client updated");
    Ok(Json(client))
}

/// DELETE /api/v1/client/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Client>> {
    let Path(id) = id?;

    let mut conn = state.db.acquire().await?;
    if state.clients.get_by_id(&mut conn, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let client = state.clients.delete(&mut conn, id).await?;

    tracing::info!(codcli = id, "client deleted");
    Ok(Json(client))
}
